/// Builds per-asset icon URLs of the form `<base>/<SYMBOL>.svg`.
#[derive(Debug, Clone)]
pub struct IconResolver {
    base_url: String,
}

impl IconResolver {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, symbol: &str) -> String {
        format!("{}/{}.svg", self.base_url, symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_url() {
        let icons = IconResolver::new("https://icons.example.com/tokens");
        assert_eq!(
            icons.url_for("ETH"),
            "https://icons.example.com/tokens/ETH.svg"
        );
    }

    #[test]
    fn test_icon_url_trailing_slash() {
        let icons = IconResolver::new("https://icons.example.com/tokens/");
        assert_eq!(
            icons.url_for("USD"),
            "https://icons.example.com/tokens/USD.svg"
        );
    }
}
