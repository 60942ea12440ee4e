/// PUT商品ハンドラー
///
/// HTTPリクエストの検証、ストアへのupsert、レスポンス生成を行う。
/// すべてのコードパスが整形されたレスポンスを返し、
/// 内部の診断情報はログにのみ出力する。
use lambda_http::http::header::{HeaderValue, CONTENT_TYPE};
use lambda_http::{Body, Request, RequestExt, Response};
use tracing::{debug, error, info};

use crate::domain::{ProductValidator, ValidationError};
use crate::infrastructure::ProductRepository;

/// 405レスポンスの本文
const METHOD_NOT_ALLOWED_BODY: &str = "Only PUT allowed";

/// 400レスポンスの本文
///
/// ボディのパース失敗とID不一致の両方で同じ文言を返す（外部仕様）。
/// 内部ではValidationErrorの別バリアントとして区別し、ログで判別できる。
const ID_MISMATCH_BODY: &str = "Product ID in the body does not match path parameter";

/// 500レスポンスの本文（内部詳細は応答に含めない）
const INTERNAL_ERROR_BODY: &str = "Internal Server Error";

/// PUT商品リクエストを処理するハンドラー
///
/// リクエストの検証とリポジトリへのupsert委譲を行い、
/// 結果をHTTPレスポンスに変換する。
pub struct PutProductHandler<R: ProductRepository> {
    /// 商品リポジトリ
    product_repo: R,
}

impl<R: ProductRepository> PutProductHandler<R> {
    /// 新しいPutProductHandlerを作成
    pub fn new(product_repo: R) -> Self {
        Self { product_repo }
    }

    /// PUT商品リクエストを処理
    ///
    /// # 処理フロー
    /// 1. メソッド・パスパラメータ・ボディの検証（副作用なし）
    /// 2. 検証済み商品のupsert（このハンドラー唯一のI/O）
    /// 3. 結果のレスポンス変換
    ///
    /// # 引数
    /// * `request` - API Gateway経由のHTTPリクエスト
    ///
    /// # 戻り値
    /// 常に整形されたHTTPレスポンス（このメソッドは失敗しない）
    pub async fn handle(&self, request: &Request) -> Response<Body> {
        let method = request.method().as_str();
        let path_parameters = request.path_parameters();
        let path_id = path_parameters.first("id");

        // 検証（ボディは&[u8]としてそのまま渡す）
        let product = match ProductValidator::validate(method, path_id, request.body()) {
            Ok(product) => product,
            Err(ValidationError::MethodNotAllowed(method)) => {
                debug!(method = %method, "PUT以外のメソッドを拒否");
                return Self::text_response(405, METHOD_NOT_ALLOWED_BODY);
            }
            Err(ValidationError::MissingPathParameter) => {
                // ホスト側のルーティング契約違反。クライアント起因ではないため500
                error!("パスパラメータidが存在しません");
                return Self::text_response(500, INTERNAL_ERROR_BODY);
            }
            Err(err) => {
                // InvalidBodyとIdMismatchは外部には同じ400として返す
                debug!(
                    path_id = path_id.unwrap_or(""),
                    error = %err,
                    "リクエスト検証失敗"
                );
                return Self::text_response(400, ID_MISMATCH_BODY);
            }
        };

        // 検証済み商品をupsert
        match self.product_repo.put(&product).await {
            Ok(()) => {
                info!(product_id = %product.id, "商品を保存");
                Self::text_response(201, format!("Created product with id {}", product.id))
            }
            Err(err) => {
                // 診断情報はログにのみ出力し、応答には汎用メッセージを返す
                error!(
                    product_id = %product.id,
                    error = %err,
                    "商品の保存に失敗"
                );
                Self::text_response(500, INTERNAL_ERROR_BODY)
            }
        }
    }

    /// プレーンテキストのレスポンスを生成
    fn text_response(status: u16, body: impl Into<String>) -> Response<Body> {
        let mut response = Response::builder()
            .status(status)
            .body(Body::Text(body.into()))
            .expect("レスポンスの構築に失敗");

        response
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));

        response
    }
}
