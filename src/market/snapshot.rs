use serde::{Deserialize, Serialize};

use super::Quote;

/// 指数快照，仅用于展示，不持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSnapshot {
    /// 展示名称
    pub name: String,
    /// 最新价，千分位分隔并保留两位小数，如 `1,234.50`
    pub value: String,
    /// 带符号的涨跌幅，如 `+0.72%`、`-1.23%`
    pub change: String,
    /// 涨跌额是否非负
    pub is_positive: bool,
}

impl IndexSnapshot {
    /// 由行情构造快照
    ///
    /// 缺失的数值按 0 处理。正负号与 `is_positive` 由涨跌额决定，
    /// 数字部分取自涨跌幅，两者不做一致性校验。
    pub fn from_quote(name: impl Into<String>, quote: &Quote) -> Self {
        let price = quote.price.unwrap_or(0.0);
        let change = quote.change.unwrap_or(0.0);
        let change_percent = quote.change_percent.unwrap_or(0.0);

        Self {
            name: name.into(),
            value: format_price(price),
            change: format_change(change, change_percent),
            is_positive: change >= 0.0,
        }
    }
}

/// 按 en-US 习惯格式化价格：千分位逗号，固定两位小数
pub fn format_price(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// 格式化涨跌幅
///
/// 涨跌额非负时补 `+` 号，数字保留两位小数。
pub fn format_change(change: f64, change_percent: f64) -> String {
    let sign = if change >= 0.0 { "+" } else { "" };
    format!("{sign}{change_percent:.2}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(1234.5), "1,234.50");
        assert_eq!(format_price(0.0), "0.00");
        assert_eq!(format_price(999.999), "1,000.00");
        assert_eq!(format_price(64000.5), "64,000.50");
        assert_eq!(format_price(1234567.891), "1,234,567.89");
        assert_eq!(format_price(-4321.0), "-4,321.00");
        assert_eq!(format_price(-0.001), "0.00");
        assert_eq!(format_price(f64::NAN), "0.00");
    }

    #[test]
    fn test_format_change() {
        assert_eq!(format_change(-65.2, -1.23), "-1.23%");
        assert_eq!(format_change(0.0, 0.0), "+0.00%");
        assert_eq!(format_change(1.25, 0.72), "+0.72%");
    }

    #[test]
    fn test_from_quote() {
        let snapshot = IndexSnapshot::from_quote(
            "S&P 500",
            &Quote {
                price: Some(5234.5),
                change: Some(-65.2),
                change_percent: Some(-1.23),
            },
        );
        assert_eq!(
            snapshot,
            IndexSnapshot {
                name: "S&P 500".to_string(),
                value: "5,234.50".to_string(),
                change: "-1.23%".to_string(),
                is_positive: false,
            }
        );
    }

    #[test]
    fn test_missing_values_become_zero() {
        let snapshot = IndexSnapshot::from_quote("Bitcoin", &Quote::default());
        assert_eq!(snapshot.value, "0.00");
        assert_eq!(snapshot.change, "+0.00%");
        assert!(snapshot.is_positive);
    }

    #[test]
    fn test_sign_follows_absolute_change() {
        // 涨跌额与涨跌幅方向不一致时原样保留
        let snapshot = IndexSnapshot::from_quote(
            "Dow Jones",
            &Quote {
                price: Some(39000.0),
                change: Some(12.0),
                change_percent: Some(-0.5),
            },
        );
        assert_eq!(snapshot.change, "+-0.50%");
        assert!(snapshot.is_positive);
    }

    #[test]
    fn test_serialized_field_names() {
        let json = serde_json::to_value(IndexSnapshot::from_quote("Nasdaq 100", &Quote::default()))
            .unwrap();
        assert_eq!(json["isPositive"], true);
        assert_eq!(json["name"], "Nasdaq 100");
    }
}
