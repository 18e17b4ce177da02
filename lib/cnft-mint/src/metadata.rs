use async_trait::async_trait;

/// Width of an Arweave transaction id; the mock segment is padded to match.
const SEGMENT_WIDTH: usize = 43;
const URI_PREFIX: &str = "https://arweave.net/";

/// Deterministic placeholder for a metadata upload: the sum of the name's
/// character codes, base-36 encoded and left-padded to a full Arweave-sized
/// segment. No I/O and no failure mode.
pub fn mock_metadata_uri(name: &str) -> String {
    let sum: u64 = name.chars().map(|c| c as u64).sum();
    let encoded = to_base36(sum);
    format!("{URI_PREFIX}{encoded:x>SEGMENT_WIDTH$}")
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_owned();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Seam for the real content-addressed upload. The orchestrator only sees
/// this trait, so swapping the stub out is a one-line change.
#[async_trait]
pub trait MetadataStorage: Send + Sync {
    async fn metadata_uri(&self, name: &str) -> Result<String, anyhow::Error>;
}

/// The mock backend; produces [`mock_metadata_uri`].
#[derive(Debug, Default, Clone, Copy)]
pub struct MockStorage;

#[async_trait]
impl MetadataStorage for MockStorage {
    async fn metadata_uri(&self, name: &str) -> Result<String, anyhow::Error> {
        Ok(mock_metadata_uri(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!(mock_metadata_uri("Foo"), mock_metadata_uri("Foo"));
        assert_ne!(mock_metadata_uri("Foo"), mock_metadata_uri("Bar"));
    }

    #[test]
    fn matches_template() {
        for name in ["a", "Foo", "a much longer nft name with spaces"] {
            let uri = mock_metadata_uri(name);
            assert!(uri.len() <= 200);
            let segment = uri.strip_prefix(URI_PREFIX).unwrap();
            assert_eq!(segment.len(), SEGMENT_WIDTH);
            assert!(
                segment
                    .chars()
                    .all(|c| c == 'x' || c.is_ascii_alphanumeric())
            );
        }
    }

    #[test]
    fn base36_digits() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        // "Foo" = 70 + 111 + 111 = 292 = 8 * 36 + 4
        assert!(mock_metadata_uri("Foo").ends_with("84"));
    }
}
