pub mod api_key;
pub mod cors;
pub mod request_id;
