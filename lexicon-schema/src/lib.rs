pub mod request;
pub mod response;

pub use request::{
    AddContextRequest, LanguageContextRequest, SearchQuery, SearchWordsRequest,
    UpdateLanguageRequest, WordRequest,
};
pub use response::{Ack, DataBody, DefinitionBody, FailureBody, SeedBody, TableBody, WordsBody};
