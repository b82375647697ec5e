//! Deploy検証
//!
//! 候補のDeployをビジネスルールに基づいて検証します。
//! 違反は最初の1件で打ち切らず、フィールドパス付きで全件収集します。
//!
//! 検証順序:
//! 1. 構造チェック（文字数・サービス数）— 全件収集
//! 2. 構造違反があればここで返す
//! 3. クロスフィールドチェック（サービス名の一意性、depends_on参照）
//!
//! 循環依存（A→B→A）は検証対象外です。

use crate::model::{Deploy, Service};
use thiserror::Error;
use tracing::debug;

/// Deploy名の最大文字数
const DEPLOY_NAME_MAX: usize = 64;
/// 説明の最大文字数
const DESCRIPTION_MAX: usize = 65_535;
/// ドメインの最大文字数
const DOMAIN_MAX: usize = 64;
/// サービス名の最大文字数
const SERVICE_NAME_MAX: usize = 32;
/// Dockerイメージの最大文字数
const IMAGE_MAX: usize = 64;
/// 環境変数キーの最大文字数
const ENV_KEY_MAX: usize = 64;
/// 環境変数値の最大文字数
const ENV_VALUE_MAX: usize = 256;
/// ボリューム値の最大文字数
const VOLUME_MAX: usize = 256;
/// depends_onの最大文字数
const DEPENDS_ON_MAX: usize = 32;
/// ルールの最小文字数（最短の有効ルールは `Host(``)`）
const RULE_MIN: usize = "Host(``)".len();
/// ルールの最大文字数
const RULE_MAX: usize = 256;
/// certResolver名の最大文字数
const CERT_NAME_MAX: usize = 32;
/// 証明書ドメインの最大文字数
const CERT_DOMAIN_MAX: usize = 64;

/// フィールドパス付きの検証違反
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {kind}")]
pub struct Violation {
    /// 違反したフィールドのパス（例: `services[1].name`）
    pub path: String,
    pub kind: ViolationKind,
}

/// 検証違反の種別
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViolationKind {
    #[error("文字数が範囲外です（{min}〜{max}、実際: {actual}）")]
    LengthOutOfRange {
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("サービスが1つも定義されていません")]
    NoServices,

    #[error("サービス名が重複しています: {name}")]
    DuplicateServiceName { name: String },

    #[error("依存先サービスが存在しません: {name}")]
    UnknownDependency { name: String },

    #[error("サービスが自分自身に依存しています")]
    SelfDependency,
}

/// Deploy全体を検証する
///
/// 構造違反があればクロスフィールドチェックへ進まずに返します
/// （クロスフィールドチェックは構造的に妥当な形を前提とするため）。
#[tracing::instrument(skip(deploy), fields(deploy = %deploy.name, services = deploy.services.len()))]
pub fn validate_deploy(deploy: &Deploy) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    // 1. 構造チェック
    check_length(&mut violations, "name", &deploy.name, 1, DEPLOY_NAME_MAX);
    check_length(
        &mut violations,
        "description",
        &deploy.description,
        1,
        DESCRIPTION_MAX,
    );
    for (i, domain) in deploy.domains.iter().enumerate() {
        check_length(
            &mut violations,
            &format!("domains[{i}]"),
            &domain.value,
            1,
            DOMAIN_MAX,
        );
    }
    if deploy.services.is_empty() {
        violations.push(Violation {
            path: "services".to_string(),
            kind: ViolationKind::NoServices,
        });
    }
    for (i, service) in deploy.services.iter().enumerate() {
        check_service_shape(&mut violations, i, service);
    }

    if !violations.is_empty() {
        debug!(count = violations.len(), "structural violations found");
        return Err(violations);
    }

    // 2. クロスフィールドチェック
    check_unique_names(&mut violations, &deploy.services);
    check_dependencies(&mut violations, &deploy.services);

    if violations.is_empty() {
        Ok(())
    } else {
        debug!(count = violations.len(), "cross-field violations found");
        Err(violations)
    }
}

/// 1サービス分の構造チェック
fn check_service_shape(violations: &mut Vec<Violation>, index: usize, service: &Service) {
    let base = format!("services[{index}]");

    check_length(
        violations,
        &format!("{base}.name"),
        &service.name,
        1,
        SERVICE_NAME_MAX,
    );
    check_length(
        violations,
        &format!("{base}.docker_image"),
        &service.docker_image,
        1,
        IMAGE_MAX,
    );

    for (i, env) in service.environment_variables.iter().enumerate() {
        check_length(
            violations,
            &format!("{base}.environment_variables[{i}].key"),
            &env.key,
            1,
            ENV_KEY_MAX,
        );
        check_length(
            violations,
            &format!("{base}.environment_variables[{i}].value"),
            &env.value,
            1,
            ENV_VALUE_MAX,
        );
    }

    for (i, mount) in service.volumes.iter().enumerate() {
        check_length(
            violations,
            &format!("{base}.volumes[{i}]"),
            &mount.value,
            1,
            VOLUME_MAX,
        );
    }

    // depends_onは空文字列を許容する（未選択のフォーム値）ので上限のみ
    if let Some(depends_on) = service.networking.depends_on() {
        check_length(
            violations,
            &format!("{base}.depends_on"),
            depends_on,
            0,
            DEPENDS_ON_MAX,
        );
    }

    if let Some(config) = service.networking.exposed_config() {
        check_length(
            violations,
            &format!("{base}.exposed_config.rule"),
            &config.rule,
            RULE_MIN,
            RULE_MAX,
        );

        if let Some(certificate) = &config.certificate {
            let cert_base = format!("{base}.exposed_config.certificate");
            check_length(
                violations,
                &format!("{cert_base}.name"),
                &certificate.name,
                1,
                CERT_NAME_MAX,
            );
            check_length(
                violations,
                &format!("{cert_base}.for_domain"),
                &certificate.for_domain,
                1,
                CERT_DOMAIN_MAX,
            );
            for (i, sub) in certificate.for_sub_domains.iter().enumerate() {
                check_length(
                    violations,
                    &format!("{cert_base}.for_sub_domains[{i}]"),
                    &sub.value,
                    1,
                    CERT_DOMAIN_MAX,
                );
            }
        }
    }
}

/// サービス名の一意性チェック
///
/// 重複は後のインデックス側に対して報告します。
fn check_unique_names(violations: &mut Vec<Violation>, services: &[Service]) {
    for (i, service) in services.iter().enumerate() {
        if services[..i].iter().any(|other| other.name == service.name) {
            violations.push(Violation {
                path: format!("services[{i}].name"),
                kind: ViolationKind::DuplicateServiceName {
                    name: service.name.clone(),
                },
            });
        }
    }
}

/// depends_on参照の妥当性チェック
///
/// depends_onはinternal軸を持つバリアントにしか存在しないため、
/// アクセサがSomeを返すサービスだけが対象になります。
fn check_dependencies(violations: &mut Vec<Violation>, services: &[Service]) {
    for (i, service) in services.iter().enumerate() {
        let Some(depends_on) = service.networking.depends_on() else {
            continue;
        };
        if depends_on.is_empty() {
            continue;
        }

        if depends_on == service.name {
            violations.push(Violation {
                path: format!("services[{i}].depends_on"),
                kind: ViolationKind::SelfDependency,
            });
        } else if !services.iter().any(|other| other.name == depends_on) {
            violations.push(Violation {
                path: format!("services[{i}].depends_on"),
                kind: ViolationKind::UnknownDependency {
                    name: depends_on.to_string(),
                },
            });
        }
    }
}

/// 文字数チェックのヘルパー（バイト長で数える）
fn check_length(
    violations: &mut Vec<Violation>,
    path: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let actual = value.len();
    if actual < min || actual > max {
        violations.push(Violation {
            path: path.to_string(),
            kind: ViolationKind::LengthOutOfRange { min, max, actual },
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Certificate, Deploy, Domain, EnvVar, ExposedConfig, ServiceNetworking, SubDomain,
        VolumeMount,
    };

    fn service(name: &str) -> Service {
        Service {
            name: name.to_string(),
            docker_image: "nginx:alpine".to_string(),
            networking: ServiceNetworking::Isolated,
            environment_variables: vec![],
            volumes: vec![],
        }
    }

    fn deploy(services: Vec<Service>) -> Deploy {
        Deploy {
            name: "demo".to_string(),
            description: "テスト".to_string(),
            domains: vec![],
            services,
        }
    }

    #[test]
    fn test_valid_deploy() {
        let deploy = deploy(vec![service("web")]);
        assert!(validate_deploy(&deploy).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut d = deploy(vec![service("web")]);
        d.name = String::new();

        let violations = validate_deploy(&d).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "name");
        assert!(matches!(
            violations[0].kind,
            ViolationKind::LengthOutOfRange { min: 1, max: 64, actual: 0 }
        ));
    }

    #[test]
    fn test_no_services_rejected() {
        let d = deploy(vec![]);
        let violations = validate_deploy(&d).unwrap_err();
        assert_eq!(violations[0].path, "services");
        assert_eq!(violations[0].kind, ViolationKind::NoServices);
    }

    #[test]
    fn test_all_structural_violations_collected() {
        // 構造違反は1件で打ち切らず全件返す
        let mut bad = service("");
        bad.docker_image = "x".repeat(65);
        bad.environment_variables = vec![EnvVar {
            key: String::new(),
            value: "ok".to_string(),
        }];

        let d = deploy(vec![bad]);
        let violations = validate_deploy(&d).unwrap_err();

        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"services[0].name"));
        assert!(paths.contains(&"services[0].docker_image"));
        assert!(paths.contains(&"services[0].environment_variables[0].key"));
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_duplicate_service_name_reported_on_later_index() {
        let d = deploy(vec![service("web"), service("web")]);
        let violations = validate_deploy(&d).unwrap_err();

        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "services[1].name");
        assert!(matches!(
            &violations[0].kind,
            ViolationKind::DuplicateServiceName { name } if name == "web"
        ));
    }

    #[test]
    fn test_self_dependency_rejected() {
        let mut s = service("self");
        s.networking = ServiceNetworking::Internal {
            depends_on: Some("self".to_string()),
        };

        let violations = validate_deploy(&deploy(vec![s])).unwrap_err();
        assert_eq!(violations[0].path, "services[0].depends_on");
        assert_eq!(violations[0].kind, ViolationKind::SelfDependency);
    }

    #[test]
    fn test_unknown_dependency_rejected() {
        let mut s = service("api");
        s.networking = ServiceNetworking::Internal {
            depends_on: Some("db".to_string()),
        };

        let violations = validate_deploy(&deploy(vec![s])).unwrap_err();
        assert_eq!(violations[0].path, "services[0].depends_on");
        assert!(matches!(
            &violations[0].kind,
            ViolationKind::UnknownDependency { name } if name == "db"
        ));
    }

    #[test]
    fn test_known_dependency_accepted() {
        let mut api = service("api");
        api.networking = ServiceNetworking::Internal {
            depends_on: Some("db".to_string()),
        };
        let mut db = service("db");
        db.networking = ServiceNetworking::Internal { depends_on: None };

        assert!(validate_deploy(&deploy(vec![api, db])).is_ok());
    }

    #[test]
    fn test_empty_depends_on_accepted() {
        // フォームの未選択値（空文字列）は参照チェックの対象外
        let mut s = service("api");
        s.networking = ServiceNetworking::Internal {
            depends_on: Some(String::new()),
        };

        assert!(validate_deploy(&deploy(vec![s])).is_ok());
    }

    #[test]
    fn test_cyclic_dependency_accepted() {
        // 循環依存は検証しない（既知のギャップ）
        let mut a = service("a");
        a.networking = ServiceNetworking::Internal {
            depends_on: Some("b".to_string()),
        };
        let mut b = service("b");
        b.networking = ServiceNetworking::Internal {
            depends_on: Some("a".to_string()),
        };

        assert!(validate_deploy(&deploy(vec![a, b])).is_ok());
    }

    #[test]
    fn test_rule_too_short_rejected() {
        let mut s = service("web");
        s.networking = ServiceNetworking::Exposed {
            config: ExposedConfig {
                rule: "Host()".to_string(), // 8文字未満
                port: None,
                certificate: None,
            },
        };

        let violations = validate_deploy(&deploy(vec![s])).unwrap_err();
        assert_eq!(violations[0].path, "services[0].exposed_config.rule");
    }

    #[test]
    fn test_certificate_fields_checked() {
        let mut s = service("web");
        s.networking = ServiceNetworking::Exposed {
            config: ExposedConfig {
                rule: "Host(`a.com`)".to_string(),
                port: None,
                certificate: Some(Certificate {
                    name: String::new(),
                    for_domain: "a.com".to_string(),
                    for_sub_domains: vec![SubDomain {
                        value: "b".repeat(65),
                    }],
                }),
            },
        };

        let violations = validate_deploy(&deploy(vec![s])).unwrap_err();
        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"services[0].exposed_config.certificate.name"));
        assert!(paths.contains(&"services[0].exposed_config.certificate.for_sub_domains[0]"));
    }

    #[test]
    fn test_structural_violations_block_cross_field_checks() {
        // 名前が空のサービスが重複していても、まず構造違反のみが返る
        let d = deploy(vec![service(""), service("")]);
        let violations = validate_deploy(&d).unwrap_err();
        assert!(
            violations
                .iter()
                .all(|v| matches!(v.kind, ViolationKind::LengthOutOfRange { .. }))
        );
    }

    #[test]
    fn test_domain_length_checked() {
        let mut d = deploy(vec![service("web")]);
        d.domains = vec![
            Domain {
                value: "ok.example.com".to_string(),
            },
            Domain {
                value: String::new(),
            },
        ];

        let violations = validate_deploy(&d).unwrap_err();
        assert_eq!(violations[0].path, "domains[1]");
    }

    #[test]
    fn test_volume_length_checked() {
        let mut s = service("db");
        s.volumes = vec![VolumeMount {
            value: String::new(),
        }];

        let violations = validate_deploy(&deploy(vec![s])).unwrap_err();
        assert_eq!(violations[0].path, "services[0].volumes[0]");
    }

    #[test]
    fn test_violation_display() {
        let violation = Violation {
            path: "services[1].name".to_string(),
            kind: ViolationKind::DuplicateServiceName {
                name: "web".to_string(),
            },
        };
        let message = violation.to_string();
        assert!(message.starts_with("services[1].name: "));
        assert!(message.contains("web"));
    }
}
