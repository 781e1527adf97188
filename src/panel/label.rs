/// 사양 이름에서 만든 필드 라벨. `A_PB` → 기호 `A`, 아래첨자 `PB`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLabel {
    symbol: String,
    subscript: Option<String>,
}

impl SpecLabel {
    /// 첫 `_`를 기준으로 기호와 아래첨자를 나눈다. 앞뒤 공백은 제거한다.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        match name.split_once('_') {
            Some((symbol, sub)) if !sub.is_empty() => Self {
                symbol: symbol.to_string(),
                subscript: Some(sub.to_string()),
            },
            Some((symbol, _)) => Self {
                symbol: symbol.to_string(),
                subscript: None,
            },
            None => Self {
                symbol: name.to_string(),
                subscript: None,
            },
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn subscript(&self) -> Option<&str> {
        self.subscript.as_deref()
    }

    /// 리치 텍스트 라벨, 예: `<b><i>A</i><sub>PB</sub></b>`
    pub fn rich_text(&self) -> String {
        match &self.subscript {
            Some(sub) => format!("<b><i>{}</i><sub>{sub}</sub></b>", self.symbol),
            None => format!("<b><i>{}</i></b>", self.symbol),
        }
    }
}

impl std::fmt::Display for SpecLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.subscript {
            Some(sub) => write!(f, "{}_{sub}", self.symbol),
            None => f.write_str(&self.symbol),
        }
    }
}
