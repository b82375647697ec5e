//! Composeドキュメントの生成
//!
//! Deploy全体をDocker Compose v3.3形式のテキストに変換します。
//! ドキュメントの冒頭は固定で、`internal`（非external）と
//! `proxy`（external、Traefik側で作成済み）の2ネットワークを常に宣言します。
//! サービスが実際にどちらを使うかには依存しません。

use crate::labels::resolve;
use crate::volumes::dedupe_named_volumes;
use deploykit_core::{Deploy, Service};
use tracing::debug;

/// 固定ヘッダ（バージョンとネットワーク宣言）
const PREAMBLE: &str = r#"version: "3.3"

networks:
  internal:
    external: false
  # traefik network
  proxy:
    external: true

"#;

/// Composeドキュメントを生成する
///
/// Deployが無い場合は空文字列（エラーではなく定義済みのno-op）。
pub fn generate(deploy: Option<&Deploy>) -> String {
    match deploy {
        Some(deploy) => generate_deploy(deploy),
        None => String::new(),
    }
}

/// 検証済みDeployからComposeドキュメントを生成する
///
/// ここでは検証を行いません。検証を通っていない入力
/// （未解決のdepends_onなど）もそのまま文字列に展開されます。
#[tracing::instrument(skip(deploy), fields(deploy = %deploy.name, services = deploy.services.len()))]
pub fn generate_deploy(deploy: &Deploy) -> String {
    let mut doc = String::with_capacity(PREAMBLE.len() + deploy.services.len() * 512);
    doc.push_str(PREAMBLE);

    doc.push_str("services:\n");
    for service in &deploy.services {
        push_service_block(&mut doc, service);
    }

    let named_volumes = dedupe_named_volumes(&deploy.services);
    if !named_volumes.is_empty() {
        doc.push_str("\nvolumes:\n");
        for name in &named_volumes {
            doc.push_str(&format!("  {name}:\n"));
        }
    }

    debug!(bytes = doc.len(), volumes = named_volumes.len(), "compose document generated");
    doc
}

/// 1サービス分のブロックを書き出す
///
/// フィールド順は固定: image → restart → networks → depends_on →
/// volumes → environment → labels。
fn push_service_block(doc: &mut String, service: &Service) {
    let exposure = resolve(service);
    let internal = service.networking.has_internal();

    doc.push_str(&format!("  {}:\n", service.name));
    doc.push_str(&format!("    image: {}\n", service.docker_image));
    doc.push_str("    restart: always\n");

    // どちらのネットワークにも参加しないサービスはブロックごと省略（分離宣言）
    if internal || exposure.proxy_network {
        doc.push_str("    networks:\n");
        if internal {
            doc.push_str("      - internal\n");
        }
        if exposure.proxy_network {
            doc.push_str("      - proxy\n");
        }
    }

    // depends_onはinternalかつ非空の場合のみ。volumesの有無には依存しない
    if internal
        && let Some(depends_on) = service.networking.depends_on()
        && !depends_on.is_empty()
    {
        doc.push_str("    depends_on:\n");
        doc.push_str(&format!("      - {depends_on}\n"));
    }

    if !service.volumes.is_empty() {
        doc.push_str("    volumes:\n");
        for mount in &service.volumes {
            doc.push_str(&format!("      - {}\n", mount.value));
        }
    }

    if !service.environment_variables.is_empty() {
        doc.push_str("    environment:\n");
        for env in &service.environment_variables {
            // 値はクォートせずそのまま
            doc.push_str(&format!("      {}: {}\n", env.key, env.value));
        }
    }

    if !exposure.groups.is_empty() {
        doc.push_str("    labels:\n");
        for group in &exposure.groups {
            if let Some(banner) = group.banner {
                doc.push_str(&format!("      # {banner}\n"));
            }
            for label in &group.labels {
                doc.push_str(&format!("      - {label}\n"));
            }
        }
    }
}
