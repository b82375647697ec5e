//! deploykit-compose — DeployからDocker Composeドキュメントへの変換
//!
//! 検証済みの [`Deploy`](deploykit_core::Deploy) を受け取り、
//! Traefikのルーティングラベル付きのComposeドキュメント（v3.3形式）を
//! テキストとして生成します。
//!
//! 変換は参照透過で、I/Oも共有状態もありません。
//! 検証はここでは行いません（`deploykit-core::validate` が前段で実施）。
//! 検証を通っていない入力に対しても panic せず、
//! ベストエフォートのテキストを返します。

pub mod compiler;
pub mod labels;
pub mod volumes;

pub use compiler::{generate, generate_deploy};
pub use labels::{Exposure, LabelGroup, resolve};
pub use volumes::dedupe_named_volumes;
