//! Game rules for connect four.
//!
//! Pure functions evaluating a board after a placement. Rules are kept
//! apart from board storage so the session and the search engine share
//! one definition of a win.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::check_win;
