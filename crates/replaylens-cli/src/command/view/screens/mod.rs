pub use self::{help::HelpScreen, match_viewer::MatchViewerScreen};

mod help;
mod match_viewer;
