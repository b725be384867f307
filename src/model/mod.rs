pub mod credential;
pub mod huaweiads;
pub mod huaweiads_response;
