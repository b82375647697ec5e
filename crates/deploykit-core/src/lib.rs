//! deploykit-core — Deploy定義のモデルと検証
//!
//! Webフォームから構築された「Deploy」（名前・説明・ドメイン・サービス群）を
//! メモリ上の型として表現し、ビジネスルールに基づいて検証します。
//!
//! Compose ドキュメントへの変換は `deploykit-compose` が担当します。
//! このクレートは純粋な同期処理のみで、I/Oを一切行いません。

pub mod model;
pub mod store;
pub mod validate;

pub use model::{
    Certificate, Deploy, Domain, EnvVar, ExposedConfig, Service, ServiceNetworking, SubDomain,
    VolumeMount,
};
pub use store::{DeployId, DeployStore, DeploySummary, MemoryStore, StoreError};
pub use validate::{Violation, ViolationKind, validate_deploy};
