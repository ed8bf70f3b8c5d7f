pub mod shared {
    pub mod core {
        pub mod keyed_locks;
        pub mod primitives;
    }
}

pub mod modules {
    pub mod tracker {
        pub mod core {
            pub mod change_log;
            pub mod data_value;
            pub mod import_strategy;
            pub mod payload;
            pub mod references;
        }
        pub mod use_cases {
            pub mod import_bundle {
                pub mod classify;
                pub mod command;
                pub mod decision;
                pub mod errors;
                pub mod handler;
                pub mod report;
            }
            pub mod query_change_logs {
                pub mod handler;
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod change_log_store;
                pub mod change_log_store_in_memory;
                pub mod metadata_catalog;
                pub mod value_store;
                pub mod value_store_in_memory;
            }
        }
    }
}

pub mod shell;
