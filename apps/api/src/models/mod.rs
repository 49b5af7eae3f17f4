pub mod matching;
pub mod resume;

pub use matching::{MatchResult, Verdict};
pub use resume::{Education, Experience, ResumeData};
