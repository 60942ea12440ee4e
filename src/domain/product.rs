/// 商品モデル
///
/// このサービスが扱う唯一のエンティティ。必須なのは`id`のみで、
/// それ以外の属性（name, priceなど）はこのコアにとって不透明な値として
/// そのまま保持・永続化する。
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 商品レコード
///
/// `id`はストアの一意キー。パスパラメータの`id`と一致しない限り
/// 書き込みは行われない。追加フィールドは`attributes`にフラット化して
/// 保持するため、シリアライズすると元のJSONオブジェクトと同じ形に戻る。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 商品ID（ストアのパーティションキー）
    pub id: String,

    /// 不透明な追加属性（name, priceなど）
    #[serde(flatten)]
    pub attributes: serde_json::Map<String, Value>,
}

impl Product {
    /// 追加属性なしの商品を作成（テスト用途が主）
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: serde_json::Map::new(),
        }
    }
}
