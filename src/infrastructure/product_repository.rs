/// DynamoDBで商品を管理するための商品リポジトリ
///
/// 外部ストアへの唯一の窓口。`put`はidをキーにした無条件のupsertで、
/// 同じ値で二度呼び出しても保存結果は変わらない（冪等）。
use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use serde_dynamo::aws_sdk_dynamodb_1::{from_item, to_item};
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::Product;

/// 商品リポジトリ操作のエラー型
///
/// バリデーションエラーとは独立したチャネル。このエラーが返った場合、
/// 書き込みは「試みられたが失敗した」ことを意味する。
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProductRepositoryError {
    /// DynamoDBへの書き込みに失敗
    #[error("Write error: {0}")]
    WriteError(String),

    /// DynamoDBからの読み取りに失敗
    #[error("Read error: {0}")]
    ReadError(String),

    /// データのシリアライズ/デシリアライズに失敗
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// 商品永続化用トレイト
///
/// 異なる実装を可能にします（実際のDynamoDB、テスト用モック）。
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// 商品をupsert（存在しなければ作成、存在すれば上書き）
    ///
    /// # 引数
    /// * `product` - 保存する検証済みの商品
    ///
    /// # 戻り値
    /// * 成功時は`Ok(())`
    /// * 失敗時は`Err(ProductRepositoryError)`（このコアでは再試行しない）
    async fn put(&self, product: &Product) -> Result<(), ProductRepositoryError>;

    /// 商品IDで取得
    ///
    /// # 引数
    /// * `product_id` - 商品ID
    ///
    /// # 戻り値
    /// * 見つかった場合は`Ok(Some(Product))`
    /// * 見つからなかった場合は`Ok(None)`
    /// * 失敗時は`Err(ProductRepositoryError)`
    async fn get_by_id(&self, product_id: &str)
        -> Result<Option<Product>, ProductRepositoryError>;
}

/// ProductRepositoryのDynamoDB実装
///
/// この構造体はDynamoDBを使用して商品を永続的に保存する
/// ProductRepositoryトレイトを実装します。
#[derive(Debug, Clone)]
pub struct DynamoProductRepository {
    /// DynamoDBクライアント
    client: DynamoDbClient,
    /// 商品テーブル名
    table_name: String,
}

impl DynamoProductRepository {
    /// 新しいDynamoProductRepositoryを作成
    ///
    /// # 引数
    /// * `client` - DynamoDBクライアント
    /// * `table_name` - 商品テーブルの名前
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    /// 商品をDynamoDBアイテムにシリアライズ
    ///
    /// 不透明な追加属性（name, priceなど）もネイティブな
    /// AttributeValueに変換される。
    fn serialize_product(
        product: &Product,
    ) -> Result<HashMap<String, AttributeValue>, ProductRepositoryError> {
        to_item(product).map_err(|e| ProductRepositoryError::SerializationError(e.to_string()))
    }

    /// DynamoDBアイテムから商品をデシリアライズ
    fn deserialize_product(
        item: HashMap<String, AttributeValue>,
    ) -> Result<Product, ProductRepositoryError> {
        from_item(item).map_err(|e| ProductRepositoryError::SerializationError(e.to_string()))
    }
}

#[async_trait]
impl ProductRepository for DynamoProductRepository {
    async fn put(&self, product: &Product) -> Result<(), ProductRepositoryError> {
        let item = Self::serialize_product(product)?;

        // 無条件put: 既存アイテムはそのまま上書きされる（last-write-wins）
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| ProductRepositoryError::WriteError(e.into_service_error().to_string()))?;

        Ok(())
    }

    async fn get_by_id(
        &self,
        product_id: &str,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("id", AttributeValue::S(product_id.to_string()))
            .send()
            .await
            .map_err(|e| ProductRepositoryError::ReadError(e.into_service_error().to_string()))?;

        match result.item {
            Some(item) => Ok(Some(Self::deserialize_product(item)?)),
            None => Ok(None),
        }
    }
}
