//! DNS-1123 name checks and deterministic shortening

use data_encoding::BASE32_NOPAD;
use lazy_static::lazy_static;
use regex::Regex;
use sha2::{Digest, Sha256};

/// Maximum length of a DNS subdomain
pub const MAX_SUBDOMAIN_LENGTH: usize = 253;
/// Maximum length of a single DNS label
pub const MAX_LABEL_LENGTH: usize = 63;

/// Characters of an over-long label kept before the hash suffix
const LABEL_KEEP: usize = 54;
/// Hex characters of the domain hash appended to a shortened label
const LABEL_HASH_LENGTH: usize = 8;
/// Characters of the domain hash appended to a shortened wildcard ingress name
const WILDCARD_HASH_LENGTH: usize = 5;

lazy_static! {
    static ref DNS1123_SUBDOMAIN: Regex =
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
            .expect("DNS1123_SUBDOMAIN should be a valid regex pattern");
}

/// Check `value` against the DNS-1123 subdomain rules.
///
/// Returns every violated rule, empty when the name is legal.
pub fn dns1123_subdomain_errors(value: &str) -> Vec<String> {
    let mut errors = Vec::new();
    if value.len() > MAX_SUBDOMAIN_LENGTH {
        errors.push(format!("must be no more than {} characters", MAX_SUBDOMAIN_LENGTH));
    }
    if !DNS1123_SUBDOMAIN.is_match(value) {
        errors.push(
            "a lowercase RFC 1123 subdomain must consist of lower case alphanumeric characters, \
             '-' or '.', and must start and end with an alphanumeric character"
                .to_string(),
        );
    }
    if value.split('.').any(|label| label.len() > MAX_LABEL_LENGTH) {
        errors.push(format!("each label must be no more than {} characters", MAX_LABEL_LENGTH));
    }
    errors
}

pub fn is_dns1123_subdomain(value: &str) -> bool {
    dns1123_subdomain_errors(value).is_empty()
}

/// Hex encoded SHA-256 digest of `value`
pub fn sha256_hex(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Eight character stand-in for an identifier in short domains
///
/// Lowercase base32 of the identifier's hex SHA-256 digest, truncated.
pub fn short_identifier(value: &str) -> String {
    let encoded = BASE32_NOPAD.encode(sha256_hex(value).as_bytes()).to_lowercase();
    head(&encoded, 8).to_string()
}

/// Rewrite every label longer than 63 characters.
///
/// Such a label becomes its first 54 characters, `-`, and the first 8 hex
/// characters of the SHA-256 of the whole domain. Legal domains are
/// returned unchanged.
pub fn shorten_long_labels(domain: &str) -> String {
    if !domain.split('.').any(|label| label.len() > MAX_LABEL_LENGTH) {
        return domain.to_string();
    }
    let digest = sha256_hex(domain);
    let hash = head(&digest, LABEL_HASH_LENGTH);
    domain
        .split('.')
        .map(|label| {
            if label.len() > MAX_LABEL_LENGTH {
                format!("{}-{}", head(label, LABEL_KEEP), hash)
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Ingress resource name for a wildcard route.
///
/// `wildcard-<domain>`, shortened with a five character hash of the domain
/// when that name is not a legal DNS-1123 subdomain.
pub fn wildcard_ingress_name(domain: &str) -> String {
    let name = format!("wildcard-{}", domain);
    if is_dns1123_subdomain(&name.to_lowercase()) {
        return name;
    }

    let digest = sha256_hex(domain);
    let hash = head(&digest, WILDCARD_HASH_LENGTH);
    let label_keep = MAX_LABEL_LENGTH - WILDCARD_HASH_LENGTH - 1;
    let mut shortened = name
        .split('.')
        .map(|label| {
            if label.len() > MAX_LABEL_LENGTH {
                format!("{}-{}", trim_separators(head(label, label_keep)), hash)
            } else {
                label.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(".");

    if shortened.len() > MAX_SUBDOMAIN_LENGTH {
        let keep = MAX_SUBDOMAIN_LENGTH - WILDCARD_HASH_LENGTH - 1;
        shortened = format!("{}-{}", trim_separators(head(&shortened, keep)), hash);
    }
    shortened
}

/// The first `n` characters of `value`
fn head(value: &str, n: usize) -> &str {
    match value.char_indices().nth(n) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

fn trim_separators(value: &str) -> &str {
    value.trim_end_matches(['-', '.'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_subdomains() {
        assert!(is_dns1123_subdomain("www.example.com"));
        assert!(is_dns1123_subdomain("a"));
        assert!(is_dns1123_subdomain("1-2.example.com"));
        assert!(is_dns1123_subdomain(&format!("{}.com", "a".repeat(63))));
    }

    #[test]
    fn test_invalid_subdomains() {
        assert!(!is_dns1123_subdomain(""));
        assert!(!is_dns1123_subdomain("WWW.example.com"));
        assert!(!is_dns1123_subdomain("-www.example.com"));
        assert!(!is_dns1123_subdomain("www.example.com."));
        assert!(!is_dns1123_subdomain("www..example.com"));
        assert!(!is_dns1123_subdomain("under_score.example.com"));
        assert!(!is_dns1123_subdomain("*.example.com"));
        assert!(!is_dns1123_subdomain(&format!("{}.com", "a".repeat(64))));
    }

    #[test]
    fn test_total_length_limit() {
        let label = "a".repeat(49);
        let long = vec![label; 6].join(".");
        assert_eq!(long.len(), 299);
        let errors = dns1123_subdomain_errors(&long);
        assert_eq!(errors, vec!["must be no more than 253 characters".to_string()]);
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_short_identifier_shape() {
        let short = short_identifier("demo");
        assert_eq!(short.len(), 8);
        assert!(short.chars().all(|c| c.is_ascii_lowercase() || ('2'..='7').contains(&c)));
        assert_eq!(short, short_identifier("demo"));
        assert_ne!(short, short_identifier("main"));
    }

    #[test]
    fn test_shorten_long_labels() {
        let long_label = "x".repeat(70);
        let domain = format!("nginx.{}.example.com", long_label);
        let shortened = shorten_long_labels(&domain);
        let labels: Vec<&str> = shortened.split('.').collect();
        assert_eq!(labels.len(), 4);
        assert_eq!(labels[0], "nginx");
        assert_eq!(labels[1].len(), 63);
        assert!(labels[1].starts_with(&"x".repeat(54)));
        assert_eq!(&labels[1][54..55], "-");
        assert_eq!(&labels[1][55..], &sha256_hex(&domain)[..8]);
        assert!(is_dns1123_subdomain(&shortened));
    }

    #[test]
    fn test_shorten_leaves_legal_domains_alone() {
        assert_eq!(shorten_long_labels("nginx.demo.main.example.com"), "nginx.demo.main.example.com");
    }

    #[test]
    fn test_wildcard_ingress_name() {
        assert_eq!(wildcard_ingress_name("example.com"), "wildcard-example.com");
    }

    #[test]
    fn test_wildcard_ingress_name_shortened() {
        let domain = format!("{}.example.com", "a".repeat(60));
        let name = wildcard_ingress_name(&domain);
        assert!(is_dns1123_subdomain(&name));
        assert!(name.starts_with("wildcard-aaaa"));
        assert_eq!(name, wildcard_ingress_name(&domain));

        let label = "b".repeat(60);
        let domain = vec![label.as_str(); 4].join(".");
        assert_eq!(domain.len(), 243);
        let name = wildcard_ingress_name(&domain);
        assert!(name.len() <= MAX_SUBDOMAIN_LENGTH);
        assert!(is_dns1123_subdomain(&name));
    }
}
