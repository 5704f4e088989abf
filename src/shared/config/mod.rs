/// 環境設定・同期設定・ログ初期化
pub mod environment;

/// アプリケーション初期化
pub mod initialization;

pub use environment::{
    get_database_filename, get_environment, initialize_logging_system,
    load_environment_variables, resolve_sync_config, Environment, EnvironmentConfig,
    SyncConfig,
};
pub use initialization::{
    default_app_data_dir, initialize_application, log_initialization_complete,
    InitializationResult,
};
