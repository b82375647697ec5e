//! 公開設定からTraefikラベルへの解決
//!
//! サービスごとに「proxyネットワークに参加するか」と
//! 「labelsブロックに書き出すラベル列」を決定します。
//! ラベルの順序は出力の決定性の一部です（固定順:
//! base → http → https → port（任意）→ redirect → certificate（任意））。

use deploykit_core::Service;

/// 1サービス分の公開解決結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exposure {
    /// proxyネットワークに参加するか
    pub proxy_network: bool,
    /// ラベルのグループ列（出力順）
    pub groups: Vec<LabelGroup>,
}

impl Exposure {
    /// グループを平坦化したラベル列
    pub fn labels(&self) -> Vec<&str> {
        self.groups
            .iter()
            .flat_map(|group| group.labels.iter().map(String::as_str))
            .collect()
    }
}

/// バナーコメント付きのラベルグループ
///
/// バナーは生成ドキュメント内の `#` コメント行になります。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGroup {
    pub banner: Option<&'static str>,
    pub labels: Vec<String>,
}

impl LabelGroup {
    fn plain(labels: Vec<String>) -> Self {
        Self {
            banner: None,
            labels,
        }
    }

    fn with_banner(banner: &'static str, labels: Vec<String>) -> Self {
        Self {
            banner: Some(banner),
            labels,
        }
    }
}

/// サービスの公開設定を解決する
///
/// 公開設定を持たないサービスは proxy 不参加・ラベルなし。
pub fn resolve(service: &Service) -> Exposure {
    let Some(config) = service.networking.exposed_config() else {
        return Exposure {
            proxy_network: false,
            groups: Vec::new(),
        };
    };

    let name = &service.name;
    let rule = &config.rule;
    let mut groups = Vec::new();

    groups.push(LabelGroup::plain(vec![
        "traefik.enable=true".to_string(),
        "traefik.docker.network=proxy".to_string(),
    ]));

    groups.push(LabelGroup::with_banner(
        "http access",
        vec![
            format!("traefik.http.routers.{name}-router.rule={rule}"),
            format!("traefik.http.routers.{name}-router.entrypoints=web"),
        ],
    ));

    groups.push(LabelGroup::with_banner(
        "https access",
        vec![
            format!("traefik.http.routers.{name}-router-websecure.rule={rule}"),
            format!("traefik.http.routers.{name}-router-websecure.entrypoints=websecure"),
            format!("traefik.http.routers.{name}-router-websecure.tls=true"),
        ],
    ));

    if let Some(port) = config.port {
        groups.push(LabelGroup::with_banner(
            "pin both routers to the container port",
            vec![
                format!("traefik.http.routers.{name}-router.service={name}-router-service"),
                format!(
                    "traefik.http.routers.{name}-router-websecure.service={name}-router-service"
                ),
                format!(
                    "traefik.http.services.{name}-router-service.loadbalancer.server.port={port}"
                ),
            ],
        ));
    }

    groups.push(LabelGroup::with_banner(
        "redirect http to https",
        vec![
            format!(
                "traefik.http.middlewares.{name}-router-redirect-to-websecure.redirectscheme.scheme=https"
            ),
            format!(
                "traefik.http.routers.{name}-router.middlewares={name}-router-redirect-to-websecure"
            ),
        ],
    ));

    if let Some(certificate) = &config.certificate {
        let mut labels = vec![
            format!(
                "traefik.http.routers.{name}-router-websecure.tls.certResolver={}",
                certificate.name
            ),
            format!(
                "traefik.http.routers.{name}-router-websecure.tls.domains[0].main={}",
                certificate.for_domain
            ),
        ];
        // sansラベルはサブドメインが1つ以上ある場合のみ
        if !certificate.for_sub_domains.is_empty() {
            let sans: Vec<&str> = certificate
                .for_sub_domains
                .iter()
                .map(|sub| sub.value.as_str())
                .collect();
            labels.push(format!(
                "traefik.http.routers.{name}-router-websecure.tls.domains[0].sans={}",
                sans.join(",")
            ));
        }
        groups.push(LabelGroup::with_banner("certificate resolution", labels));
    }

    Exposure {
        proxy_network: true,
        groups,
    }
}
