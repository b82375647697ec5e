//! Deploy定義

use super::service::Service;
use serde::{Deserialize, Serialize};

/// Deploy - スタックの設計図
///
/// Deployは複数のサービスと公開ドメインを定義し、
/// それらがどのようにComposeドキュメントへ変換されるかを記述します。
/// フォーム入力から一度だけ構築され、検証後はコンパイラへの
/// イミュータブルな入力になります。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deploy {
    /// Deploy名（1〜64文字）
    pub name: String,
    /// 説明（1〜65535文字）
    pub description: String,
    /// 公開ドメイン（メタデータ、順序を保持）
    #[serde(default)]
    pub domains: Vec<Domain>,
    /// このDeployで定義されるサービス（最低1つ、出力順を保持）
    pub services: Vec<Service>,
}

/// 公開ドメイン
///
/// ホスト名の文字列のみを保持します。到達性の確認は
/// 外部のステータスプローブ（スコープ外）が行います。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub value: String,
}
