//! モデル定義
//!
//! Deployを構成するデータモデルを定義します。
//! 各モデルは機能ごとにモジュールに分離されています。

mod deploy;
mod exposed;
mod service;
mod volume;

// Re-exports
pub use deploy::*;
pub use exposed::*;
pub use service::*;
pub use volume::*;
