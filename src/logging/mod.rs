pub mod adx_log;
