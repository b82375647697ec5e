//! Deploy永続化のコラボレータ契約
//!
//! Deployの保存・取得はこのクレートの責務ではありません（ORM・SQLは
//! 呼び出し側の層が持ちます）。ここでは呼び出し側が満たすべき契約
//! [`DeployStore`] と、テスト・開発シード用のインメモリ実装のみを定義します。

use crate::model::{Deploy, Domain};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Deployの識別子
///
/// 採番は永続化層の責務。このクレートは値を発行された後の参照にのみ使います。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DeployId(pub u64);

/// 一覧表示用のサマリ
///
/// `list()` はサービス定義の本体を含まない軽量ビューを返します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploySummary {
    pub id: DeployId,
    pub name: String,
    pub description: String,
    pub domains: Vec<Domain>,
}

/// 永続化層のエラー
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("バックエンドエラー: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// 永続化コラボレータの契約
///
/// 検証済みのDeployを受け取り、IDを採番して保存します。
/// 検証はこの層の前に行われている前提です。
pub trait DeployStore {
    /// Deployを保存してIDを返す
    fn create(&mut self, deploy: Deploy) -> Result<DeployId>;

    /// IDでDeployを取得する。存在しなければ `None`
    fn get(&self, id: DeployId) -> Result<Option<Deploy>>;

    /// 全Deployのサマリを作成順で返す
    fn list(&self) -> Result<Vec<DeploySummary>>;
}

/// インメモリ実装
///
/// テストと開発シード用。プロセスを跨ぐ永続性はありません。
#[derive(Debug, Default)]
pub struct MemoryStore {
    deploys: BTreeMap<u64, Deploy>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeployStore for MemoryStore {
    fn create(&mut self, deploy: Deploy) -> Result<DeployId> {
        self.next_id += 1;
        let id = DeployId(self.next_id);
        debug!(id = id.0, deploy = %deploy.name, "storing deploy");
        self.deploys.insert(id.0, deploy);
        Ok(id)
    }

    fn get(&self, id: DeployId) -> Result<Option<Deploy>> {
        Ok(self.deploys.get(&id.0).cloned())
    }

    fn list(&self) -> Result<Vec<DeploySummary>> {
        Ok(self
            .deploys
            .iter()
            .map(|(id, deploy)| DeploySummary {
                id: DeployId(*id),
                name: deploy.name.clone(),
                description: deploy.description.clone(),
                domains: deploy.domains.clone(),
            })
            .collect())
    }
}
