use serde::{Deserialize, Serialize};

/// 评分等级
///
/// 服务端目前只返回 A-D，其他值原样保留
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Grade {
    A,
    B,
    C,
    D,
    Other(String),
}

impl Grade {
    /// 获取等级字母
    pub fn letter(&self) -> &str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::Other(s) => s,
        }
    }

    /// 从字母解析等级
    ///
    /// 只识别大写的 A-D，其他字符串原样保留
    pub fn from_letter(s: &str) -> Self {
        match s {
            "A" => Grade::A,
            "B" => Grade::B,
            "C" => Grade::C,
            "D" => Grade::D,
            _ => Grade::Other(s.to_string()),
        }
    }
}

impl From<String> for Grade {
    fn from(s: String) -> Self {
        Grade::from_letter(&s)
    }
}

impl From<Grade> for String {
    fn from(g: Grade) -> Self {
        g.letter().to_string()
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_from_json() {
        let g: Grade = serde_json::from_str("\"B\"").unwrap();
        assert_eq!(g, Grade::B);
        let g: Grade = serde_json::from_str("\"S\"").unwrap();
        assert_eq!(g, Grade::Other("S".to_string()));
        assert_eq!(serde_json::to_string(&Grade::A).unwrap(), "\"A\"");
    }

    #[test]
    fn test_unrecognized_grade_round_trips_verbatim() {
        for raw in [" b", "b", "A+", ""] {
            let g: Grade = serde_json::from_value(serde_json::json!(raw)).unwrap();
            assert_eq!(g, Grade::Other(raw.to_string()));
            assert_eq!(serde_json::to_value(&g).unwrap(), serde_json::json!(raw));
        }
    }
}
