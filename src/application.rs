// アプリケーション層モジュール
pub mod put_product_handler;

// 再エクスポート
pub use put_product_handler::PutProductHandler;
