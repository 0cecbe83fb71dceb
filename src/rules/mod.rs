//! The annotation classification rule table.
//!
//! A fixed, ordered knowledge base of ingress-nginx annotations and
//! their Gateway API migration complexity. The table is built once at
//! startup and shared by read-only reference; lookup is exact string
//! equality on the annotation key. If two patterns ever overlapped the
//! first rule in table order would win, so ordering is part of the
//! contract even though all current patterns are distinct literals.

use crate::models::{AnnotationRule, RiskLevel};
use std::collections::BTreeMap;

/// The immutable classification rule table.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<AnnotationRule>,
}

impl RuleTable {
    /// Build the built-in ingress-nginx rule table.
    pub fn builtin() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Build a table from an explicit rule list (mostly for tests).
    pub fn from_rules(rules: Vec<AnnotationRule>) -> Self {
        Self { rules }
    }

    /// All rules in table order.
    pub fn rules(&self) -> &[AnnotationRule] {
        &self.rules
    }

    /// Look up the rule for an annotation key.
    ///
    /// Exact string equality; the first matching rule in table order
    /// wins.
    pub fn lookup(&self, key: &str) -> Option<&AnnotationRule> {
        self.rules.iter().find(|rule| rule.pattern == key)
    }

    /// Match a resource's annotation keys against the table.
    ///
    /// At most one rule is collected per key. Keys are visited in
    /// sorted order so the result is deterministic regardless of how
    /// the input map was populated.
    pub fn match_annotations<'a>(
        &'a self,
        annotations: &BTreeMap<String, String>,
    ) -> Vec<&'a AnnotationRule> {
        annotations
            .keys()
            .filter_map(|key| self.lookup(key))
            .collect()
    }

    /// Identify annotation keys inside the managed prefix that have no
    /// rule. Keys outside the prefix are never "unknown" - they are
    /// simply out of scope for risk classification.
    pub fn unknown_keys(
        &self,
        annotations: &BTreeMap<String, String>,
        managed_prefix: &str,
    ) -> Vec<String> {
        annotations
            .keys()
            .filter(|key| key.starts_with(managed_prefix) && self.lookup(key).is_none())
            .cloned()
            .collect()
    }
}

/// Reduce a set of matched rules to one overall risk level.
///
/// Precedence: `High > Manual > Auto`. An empty input resolves to
/// `Auto` - a resource with no classifiable annotations is zero-risk
/// by policy, not "unknown risk". Short-circuits on the first `High`.
pub fn resolve_risk<'a>(rules: impl IntoIterator<Item = &'a AnnotationRule>) -> RiskLevel {
    let mut highest = RiskLevel::Auto;
    for rule in rules {
        match rule.risk_level {
            RiskLevel::High => return RiskLevel::High,
            RiskLevel::Manual => highest = RiskLevel::Manual,
            RiskLevel::Auto => {}
        }
    }
    highest
}

/// The built-in annotation knowledge base.
fn builtin_rules() -> Vec<AnnotationRule> {
    vec![
        // Tier A - AUTO (annotations with established Gateway API equivalents)
        AnnotationRule {
            name: "Rewrite Target",
            pattern: "nginx.ingress.kubernetes.io/rewrite-target",
            risk_level: RiskLevel::Auto,
            description: "URL path rewriting functionality",
            migration_note: "Gateway API HTTPRoute supports path rewriting via URLRewrite \
                filters (GEP-726). Most Gateway implementations support this feature.",
            source_url: "https://gateway-api.sigs.k8s.io/guides/http-redirect-rewrite/",
        },
        AnnotationRule {
            name: "SSL Redirect",
            pattern: "nginx.ingress.kubernetes.io/ssl-redirect",
            risk_level: RiskLevel::Auto,
            description: "Automatic HTTPS redirect",
            migration_note: "Gateway API HTTPRoute supports HTTPS redirects via \
                RequestRedirect filters. Standard feature across Gateway implementations.",
            source_url: "https://gateway-api.sigs.k8s.io/guides/http-redirect-rewrite/",
        },
        AnnotationRule {
            name: "Force SSL Redirect",
            pattern: "nginx.ingress.kubernetes.io/force-ssl-redirect",
            risk_level: RiskLevel::Auto,
            description: "Force HTTPS redirect even for non-SSL listeners",
            migration_note: "Gateway API HTTPRoute supports HTTPS redirects via \
                RequestRedirect filters. Similar implementation pattern to ssl-redirect.",
            source_url: "https://gateway-api.sigs.k8s.io/guides/http-redirect-rewrite/",
        },
        AnnotationRule {
            name: "Backend Protocol",
            pattern: "nginx.ingress.kubernetes.io/backend-protocol",
            risk_level: RiskLevel::Manual,
            description: "Specifies protocol for backend communication (HTTP/HTTPS/GRPC/etc)",
            migration_note: "Gateway API BackendRef supports protocol fields, but \
                implementation varies by Gateway provider. Verify your Gateway supports \
                the required protocols.",
            source_url: "https://gateway-api.sigs.k8s.io/reference/spec/#backendref",
        },
        AnnotationRule {
            name: "Use Regex",
            pattern: "nginx.ingress.kubernetes.io/use-regex",
            risk_level: RiskLevel::Manual,
            description: "Enable regex matching for paths",
            migration_note: "Gateway API HTTPRoute supports RegularExpression path matching \
                (v1.1+). Verify your Gateway implementation supports regex and review \
                syntax differences.",
            source_url: "https://gateway-api.sigs.k8s.io/reference/spec/#httppathmatch",
        },
        // Tier B - MANUAL (medium complexity, requires review)
        AnnotationRule {
            name: "Proxy Body Size",
            pattern: "nginx.ingress.kubernetes.io/proxy-body-size",
            risk_level: RiskLevel::Manual,
            description: "Maximum size of the client request body",
            migration_note: "No standardized Gateway API equivalent. Gateway implementations \
                may support request size limits via vendor-specific policies. Check your \
                Gateway documentation.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#proxy-body-size",
        },
        AnnotationRule {
            name: "Proxy Read Timeout",
            pattern: "nginx.ingress.kubernetes.io/proxy-read-timeout",
            risk_level: RiskLevel::Manual,
            description: "Timeout for reading response from backend",
            migration_note: "Gateway API may support timeouts via implementation-specific \
                policies. Check your Gateway implementation's policy support or use \
                service mesh.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#proxy-read-timeout",
        },
        AnnotationRule {
            name: "Proxy Send Timeout",
            pattern: "nginx.ingress.kubernetes.io/proxy-send-timeout",
            risk_level: RiskLevel::Manual,
            description: "Timeout for transmitting request to backend",
            migration_note: "Similar to read timeout - check Gateway implementation policy \
                support or implement at application/service mesh level.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#proxy-send-timeout",
        },
        AnnotationRule {
            name: "Auth URL",
            pattern: "nginx.ingress.kubernetes.io/auth-url",
            risk_level: RiskLevel::Manual,
            description: "External authentication service URL",
            migration_note: "Gateway API doesn't standardize external auth, but many \
                implementations support it. Consider OAuth2/OIDC policies or service \
                mesh auth instead.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#auth-url",
        },
        AnnotationRule {
            name: "Proxy Connect Timeout",
            pattern: "nginx.ingress.kubernetes.io/proxy-connect-timeout",
            risk_level: RiskLevel::Manual,
            description: "Timeout for establishing connection to backend",
            migration_note: "Check Gateway implementation support for connection timeouts \
                or implement circuit breaker patterns at the application level.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#proxy-connect-timeout",
        },
        AnnotationRule {
            name: "Client Body Buffer Size",
            pattern: "nginx.ingress.kubernetes.io/client-body-buffer-size",
            risk_level: RiskLevel::Manual,
            description: "Buffer size for reading client request body",
            migration_note: "Implementation-specific setting. Review if your application \
                requires specific buffering behavior and implement accordingly.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#client-body-buffer-size",
        },
        AnnotationRule {
            name: "CORS Enable",
            pattern: "nginx.ingress.kubernetes.io/enable-cors",
            risk_level: RiskLevel::Manual,
            description: "Enable CORS headers",
            migration_note: "Some Gateway implementations support CORS via policies. \
                Alternatively, implement CORS at application level or via service mesh.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#enable-cors",
        },
        AnnotationRule {
            name: "Rate Limiting",
            pattern: "nginx.ingress.kubernetes.io/rate-limit",
            risk_level: RiskLevel::Manual,
            description: "Request rate limiting configuration",
            migration_note: "Gateway API is developing rate limiting standards (GEP-1731). \
                Check your Gateway implementation or use service mesh rate limiting.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#rate-limiting",
        },
        // Tier C - HIGH_RISK (complex configurations needing careful planning)
        AnnotationRule {
            name: "Server Snippet",
            pattern: "nginx.ingress.kubernetes.io/server-snippet",
            risk_level: RiskLevel::High,
            description: "Custom NGINX server block configuration",
            migration_note: "Server snippets contain custom NGINX configuration that has \
                no Gateway API equivalent. Review the configuration and implement \
                equivalent functionality using Gateway policies, service mesh, or \
                consider staying with NGINX Inc commercial controller.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#server-snippet",
        },
        AnnotationRule {
            name: "Configuration Snippet",
            pattern: "nginx.ingress.kubernetes.io/configuration-snippet",
            risk_level: RiskLevel::High,
            description: "Custom NGINX location block configuration",
            migration_note: "Configuration snippets require manual analysis and \
                reimplementation. Consider Gateway API policies, service mesh \
                capabilities, or application-level changes.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#configuration-snippet",
        },
        AnnotationRule {
            name: "Location Snippet",
            pattern: "nginx.ingress.kubernetes.io/location-snippet",
            risk_level: RiskLevel::High,
            description: "Custom NGINX location configuration",
            migration_note: "Location snippets need careful review for functionality. Map \
                to Gateway API filters, policies, or service mesh configurations where \
                possible.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#configuration-snippet",
        },
        AnnotationRule {
            name: "Stream Snippet",
            pattern: "nginx.ingress.kubernetes.io/stream-snippet",
            risk_level: RiskLevel::High,
            description: "Custom NGINX stream configuration for TCP/UDP",
            migration_note: "Stream snippets are for Layer 4 routing. Gateway API supports \
                TCP/UDP via TCPRoute/UDPRoute, but custom stream logic requires \
                reimplementation.",
            source_url: "https://gateway-api.sigs.k8s.io/reference/spec/#tcproute",
        },
        AnnotationRule {
            name: "Http Snippet",
            pattern: "nginx.ingress.kubernetes.io/http-snippet",
            risk_level: RiskLevel::High,
            description: "Custom NGINX http block configuration",
            migration_note: "HTTP snippets affect global behavior. Requires careful \
                analysis and potential migration to Gateway-level policies or \
                infrastructure changes.",
            source_url: "https://kubernetes.github.io/ingress-nginx/user-guide/nginx-configuration/annotations/#configuration-snippet",
        },
    ]
}
