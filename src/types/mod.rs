pub mod analysis;
pub mod candle;
pub mod indicators;
pub mod market;
pub mod signals;

pub use analysis::*;
pub use candle::*;
pub use indicators::*;
pub use market::*;
pub use signals::*;
