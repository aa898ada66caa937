pub mod error;
pub mod parse;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use storage::StoryStorage;
pub use types::{
    Article, BiasDistribution, BiasLabel, Perspective, Story, SYNTHESIZED_STORY_PREFIX,
    UNKNOWN_SOURCE,
};

pub mod prelude {
    pub use crate::parse::{article_from_value, articles_from_value, story_from_value};
    pub use crate::{Article, BiasLabel, Error, Perspective, Result, Story, StoryStorage};
}
