pub mod assistant;
pub mod preferences;

pub use assistant::{
    AltTextRequest, AltTextResponse, ChatGptRequest, ChatGptResponse, ChatRequest, ChatResponse,
    HistoryMessage, ReadAloudRequest, ReadAloudResponse, ReadingLevel, SimplifyRequest,
    SimplifyResponse,
};
pub use preferences::{FontSizeRequest, FontSizeResponse};
