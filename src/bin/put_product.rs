/// PUT商品HTTP Lambdaエントリポイント
///
/// API Gateway経由の`PUT /products/{id}`リクエストを処理し、
/// 検証済みの商品をDynamoDBにupsertする。
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use product_api::application::PutProductHandler;
use product_api::infrastructure::{init_logging, DynamoDbConfig, DynamoProductRepository};
use tokio::sync::OnceCell;
use tracing::{error, info};

/// PutProductHandlerの静的インスタンス
///
/// Lambda warm start時にDynamoDBクライアントを再利用するため、
/// 一度初期化したハンドラーを静的に保持する。
/// 初期化後に変更されることはなく、並行する呼び出し間で安全に共有できる。
static HANDLER: OnceCell<PutProductHandler<DynamoProductRepository>> = OnceCell::const_new();

/// PutProductHandlerを取得（初期化されていなければ初期化）
///
/// # 戻り値
/// * `Ok(&'static PutProductHandler<...>)` - 静的参照へのハンドラー
/// * `Err(DynamoDbConfigError)` - 設定読み込みエラー
async fn get_handler() -> Result<
    &'static PutProductHandler<DynamoProductRepository>,
    product_api::infrastructure::DynamoDbConfigError,
> {
    HANDLER
        .get_or_try_init(|| async {
            let config = DynamoDbConfig::from_env().await?;
            let product_repo = DynamoProductRepository::new(
                config.client().clone(),
                config.products_table().to_string(),
            );
            Ok(PutProductHandler::new(product_repo))
        })
        .await
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    info!("PutProduct Lambda関数を初期化");

    // Lambda関数を実行
    run(service_fn(handler)).await
}

/// Lambda関数のメインハンドラー
///
/// # 処理フロー
/// 1. プロセス共有のハンドラーを取得（初回のみDynamoDB設定を読み込み）
/// 2. PutProductHandlerにリクエストを委譲
///
/// どのコードパスでも整形されたレスポンスを返し、Errでプロセスを
/// 落とすことはない。
async fn handler(request: Request) -> Result<Response<Body>, Error> {
    let put_handler = match get_handler().await {
        Ok(handler) => handler,
        Err(err) => {
            // 設定エラーの詳細はログにのみ出力する
            error!(error = %err, "DynamoDB設定読み込み失敗");
            return Ok(Response::builder()
                .status(500)
                .body(Body::Text("Internal Server Error".to_string()))
                .expect("レスポンスの構築に失敗"));
        }
    };

    Ok(put_handler.handle(&request).await)
}
