/// 商品リクエストバリデーター
///
/// HTTPメソッド、パスパラメータ、リクエストボディを検査し、
/// ストアへの書き込みを試みる前に不正なリクエストを拒否する。
/// このモジュールはI/Oを一切行わない。
use thiserror::Error;

use crate::domain::Product;

/// バリデーションエラー型
///
/// ストア操作のエラー（ProductRepositoryError）とは独立したチャネル。
/// このエラーが返った時点で書き込みは一度も試みられていない。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// PUT以外のHTTPメソッド
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// パスパラメータ`id`が存在しない（ホスト側のルーティング契約違反）
    #[error("Missing path parameter: id")]
    MissingPathParameter,

    /// ボディがProductとしてパースできない
    #[error("Invalid product body: {0}")]
    InvalidBody(String),

    /// パスのIDとボディのIDが一致しない
    #[error("Product ID mismatch: path={path_id}, body={body_id}")]
    IdMismatch {
        /// パスパラメータのID
        path_id: String,
        /// ボディから取り出したID
        body_id: String,
    },
}

/// リクエストバリデーター
pub struct ProductValidator;

impl ProductValidator {
    /// PUT商品リクエストを検証する
    ///
    /// # 検証順序
    /// 1. メソッドがPUTであること（これ以外の場合、パスもボディも見ない）
    /// 2. パスパラメータ`id`が存在すること
    /// 3. ボディがProductとしてパース可能であること
    /// 4. パスのIDとボディのIDが一致すること
    ///
    /// # 引数
    /// * `method` - HTTPメソッド文字列
    /// * `path_id` - パスパラメータマップから取り出した`id`
    /// * `body` - 生のリクエストボディ（JSONを想定）
    ///
    /// # 戻り値
    /// * `Ok(Product)` - 検証済みの商品（副作用なし）
    /// * `Err(ValidationError)` - 拒否理由
    pub fn validate(
        method: &str,
        path_id: Option<&str>,
        body: &[u8],
    ) -> Result<Product, ValidationError> {
        if method != "PUT" {
            return Err(ValidationError::MethodNotAllowed(method.to_string()));
        }

        let path_id = path_id.ok_or(ValidationError::MissingPathParameter)?;

        let product: Product = serde_json::from_slice(body)
            .map_err(|e| ValidationError::InvalidBody(e.to_string()))?;

        if product.id != path_id {
            return Err(ValidationError::IdMismatch {
                path_id: path_id.to_string(),
                body_id: product.id,
            });
        }

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDGET_BODY: &[u8] = br#"{"id":"123","name":"Widget","price":9.99}"#;

    // 正常系: パスIDとボディIDが一致
    #[test]
    fn test_validate_accepts_matching_ids() {
        let result = ProductValidator::validate("PUT", Some("123"), WIDGET_BODY);

        let product = result.unwrap();
        assert_eq!(product.id, "123");
        assert_eq!(
            product.attributes.get("name"),
            Some(&serde_json::json!("Widget"))
        );
    }

    // PUT以外のメソッドは拒否
    #[test]
    fn test_validate_rejects_non_put_method() {
        for method in ["GET", "POST", "DELETE", "PATCH", "HEAD", "OPTIONS"] {
            let result = ProductValidator::validate(method, Some("123"), WIDGET_BODY);
            assert_eq!(
                result.unwrap_err(),
                ValidationError::MethodNotAllowed(method.to_string())
            );
        }
    }

    // メソッド検証が最初: パスIDもボディも不正でもMethodNotAllowedを返す
    #[test]
    fn test_validate_method_checked_before_path_and_body() {
        let result = ProductValidator::validate("GET", None, b"not json");
        assert_eq!(
            result.unwrap_err(),
            ValidationError::MethodNotAllowed("GET".to_string())
        );
    }

    // パスパラメータidの欠落
    #[test]
    fn test_validate_rejects_missing_path_parameter() {
        let result = ProductValidator::validate("PUT", None, WIDGET_BODY);
        assert_eq!(result.unwrap_err(), ValidationError::MissingPathParameter);
    }

    // 不正なJSONボディ
    #[test]
    fn test_validate_rejects_malformed_body() {
        let result = ProductValidator::validate("PUT", Some("123"), b"{not json");
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::InvalidBody(_)
        ));
    }

    // idフィールドのないボディはInvalidBody（パース失敗）
    #[test]
    fn test_validate_rejects_body_without_id() {
        let result =
            ProductValidator::validate("PUT", Some("123"), br#"{"name":"Widget"}"#);
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::InvalidBody(_)
        ));
    }

    // 空ボディもInvalidBody
    #[test]
    fn test_validate_rejects_empty_body() {
        let result = ProductValidator::validate("PUT", Some("123"), b"");
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::InvalidBody(_)
        ));
    }

    // パスIDとボディIDの不一致
    #[test]
    fn test_validate_rejects_id_mismatch() {
        let result = ProductValidator::validate("PUT", Some("123"), br#"{"id":"456"}"#);
        assert_eq!(
            result.unwrap_err(),
            ValidationError::IdMismatch {
                path_id: "123".to_string(),
                body_id: "456".to_string(),
            }
        );
    }

    // IDの比較は完全一致（大文字小文字や空白を区別）
    #[test]
    fn test_validate_id_comparison_is_exact() {
        let result = ProductValidator::validate("PUT", Some("ABC"), br#"{"id":"abc"}"#);
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::IdMismatch { .. }
        ));

        let result = ProductValidator::validate("PUT", Some("123"), br#"{"id":"123 "}"#);
        assert!(matches!(
            result.unwrap_err(),
            ValidationError::IdMismatch { .. }
        ));
    }

    // エラー表示メッセージのテスト
    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::MethodNotAllowed("GET".to_string()).to_string(),
            "Method not allowed: GET"
        );
        assert_eq!(
            ValidationError::MissingPathParameter.to_string(),
            "Missing path parameter: id"
        );
        assert_eq!(
            ValidationError::IdMismatch {
                path_id: "123".to_string(),
                body_id: "456".to_string(),
            }
            .to_string(),
            "Product ID mismatch: path=123, body=456"
        );
    }
}
