//! named volumeの重複排除
//!
//! 全サービスのボリュームマウントからnamed volume名を集め、
//! トップレベルの `volumes:` 宣言に使う一覧を作ります。

use deploykit_core::Service;

/// 全サービスを横断してnamed volume名を重複なく集める
///
/// - 名前は各マウント値の最初のコロンより前（コロンなしは全体）
/// - `./` や `/` で始まるバインドマウントは除外
/// - 初出順を保持
pub fn dedupe_named_volumes(services: &[Service]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for service in services {
        for mount in &service.volumes {
            if mount.is_bind_mount() {
                continue;
            }
            let name = mount.name();
            if !names.iter().any(|existing| existing == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}
