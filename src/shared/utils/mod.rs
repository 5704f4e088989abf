use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Asia::Ho_Chi_Minh;
use chrono_tz::Tz;

/// 表示用の日付フォーマット（日/月/年、ゼロ埋めなし）
pub const DISPLAY_DATE_FORMAT: &str = "%-d/%-m/%Y";

/// 解析用の日付フォーマット（ゼロ埋めの有無を問わない）
const PARSE_DATE_FORMAT: &str = "%d/%m/%Y";

/// 表示ロケールのタイムゾーン
pub const DISPLAY_TIMEZONE: Tz = Ho_Chi_Minh;

/// 現在日付を表示用フォーマットで取得する
pub fn today_display_date() -> String {
    format_display_date(Utc::now())
}

/// 指定時刻を表示ロケールの日付文字列（日/月/年）に変換する
pub fn format_display_date(now: DateTime<Utc>) -> String {
    now.with_timezone(&DISPLAY_TIMEZONE)
        .format(DISPLAY_DATE_FORMAT)
        .to_string()
}

/// 表示用の日付文字列を解析する
///
/// # 戻り値
/// 解析できた場合は日付、できない場合はNone
///
/// ゼロ埋めの有無（"05/03/2024" と "5/3/2024"）はどちらも受け付ける
pub fn parse_display_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), PARSE_DATE_FORMAT).ok()
}

/// タイトルのバリデーション（前後の空白を除いて空でないこと）
pub fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::validation("タイトルを入力してください"));
    }
    Ok(())
}

/// 金額のバリデーション（有限の正の数値であること）
pub fn validate_amount(amount: f64) -> AppResult<()> {
    if !amount.is_finite() {
        return Err(AppError::validation("金額は数値で入力してください"));
    }
    if amount <= 0.0 {
        return Err(AppError::validation("金額は正の数値である必要があります"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone};

    #[test]
    fn test_format_display_date() {
        // UTC 2024-03-05 20:00 はベトナム時間で 2024-03-06 03:00
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 20, 0, 0).unwrap();
        assert_eq!(format_display_date(now), "6/3/2024");

        let now = Utc.with_ymd_and_hms(2024, 12, 31, 1, 0, 0).unwrap();
        assert_eq!(format_display_date(now), "31/12/2024");

        let now = Utc.with_ymd_and_hms(2024, 1, 9, 12, 0, 0).unwrap();
        assert_eq!(format_display_date(now), "9/1/2024");
    }

    #[test]
    fn test_parse_display_date() {
        let date = parse_display_date("06/03/2024").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 6));

        let date = parse_display_date("6/3/2024").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 6));

        assert!(parse_display_date("2024-03-06").is_none());
        assert!(parse_display_date("").is_none());
    }

    #[test]
    fn test_today_round_trip() {
        assert!(parse_display_date(&today_display_date()).is_some());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("昼食").is_ok());
        assert!(validate_title("  昼食  ").is_ok());
        assert!(validate_title("").is_err());
        assert!(matches!(
            validate_title("   ").unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(50000.0).is_ok());
        assert!(validate_amount(0.01).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-100.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }
}
