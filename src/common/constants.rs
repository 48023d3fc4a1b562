// Palavras reservadas que não podem ser usadas como slug de tenant
// (subdomínio) ou de post (rota).

pub const RESERVED_TENANT_SLUGS: &[&str] = &[
    "www",
    "api",
    "admin",
    "auth",
    "static",
    "assets",
    "storage",
    "stats",
    "status",
    "mail",
    "smtp",
    "blog",
    "broker",
    "grafana",
    "kibana",
    "dashboard",
    "docs",
];

pub const RESERVED_POST_SLUGS: &[&str] = &[
    "dashboard",
    "studio",
    "login",
    "signup",
    "forgot-password",
    "me",
    "search",
    "u",
    "api",
    "settings",
    "archives",
    "tag",
    "about",
    "feeds",
    "admin",
    "config",
    "profile",
    "editor",
    "posts",
    "themes",
    "layouts",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_de_infra_estao_reservados() {
        for slug in ["www", "api", "admin", "auth", "static"] {
            assert!(RESERVED_TENANT_SLUGS.contains(&slug), "{slug} deveria estar reservado");
        }
    }

    #[test]
    fn listas_nao_tem_duplicatas() {
        for list in [RESERVED_TENANT_SLUGS, RESERVED_POST_SLUGS] {
            let mut seen = std::collections::HashSet::new();
            for slug in list {
                assert!(seen.insert(slug), "{slug} aparece duas vezes");
            }
        }
    }
}
