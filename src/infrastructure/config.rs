/// DynamoDB接続設定
use aws_sdk_dynamodb::Client as DynamoDbClient;
use thiserror::Error;

/// DynamoDB設定のエラー型
#[derive(Debug, Error)]
pub enum DynamoDbConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// テーブル名とクライアントを持つDynamoDB設定
///
/// 環境変数から読み込んだDynamoDBクライアントと商品テーブル名を保持する。
/// クライアントはプロセス起動時に一度だけ構築し、以降のすべての呼び出しで
/// 共有する（初期化後に変更されることはない）。
///
/// テーブル名は以下の環境変数で設定:
/// - PRODUCTS_TABLE: 商品保存用テーブル
#[derive(Debug, Clone)]
pub struct DynamoDbConfig {
    /// DynamoDBクライアントインスタンス
    client: DynamoDbClient,
    /// 商品テーブル名
    products_table: String,
}

impl DynamoDbConfig {
    /// 環境からAWS設定を読み込み、環境変数からテーブル名を読み取って新しいDynamoDbConfigを作成
    ///
    /// 環境変数:
    /// - AWS認証情報: aws-configにより自動読み込み
    /// - PRODUCTS_TABLE: 商品用DynamoDBテーブル名
    pub async fn from_env() -> Result<Self, DynamoDbConfigError> {
        // 環境からAWS設定を読み込み（認証情報、リージョンなど）
        let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;

        // AWS設定からDynamoDBクライアントを作成
        let client = DynamoDbClient::new(&aws_config);

        // 環境変数からテーブル名を読み込み
        let products_table = std::env::var("PRODUCTS_TABLE")
            .map_err(|_| DynamoDbConfigError::MissingEnvVar("PRODUCTS_TABLE".to_string()))?;

        Ok(Self {
            client,
            products_table,
        })
    }

    /// 明示的な値で新しいDynamoDbConfigを作成（テスト用）
    pub fn new(client: DynamoDbClient, products_table: String) -> Self {
        Self {
            client,
            products_table,
        }
    }

    /// DynamoDBクライアントへの参照を取得
    pub fn client(&self) -> &DynamoDbClient {
        &self.client
    }

    /// 商品テーブル名を取得
    pub fn products_table(&self) -> &str {
        &self.products_table
    }
}
