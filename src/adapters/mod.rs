//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements     | Connects to                  |
//! |----------------|----------------|------------------------------|
//! | `config_file`  | ConfigPort     | JSON config file             |
//! | `json_store`   | SaveSlotPort   | one JSON file per pet        |
//! | `log_sink`     | EventSink      | `log` facade                 |
//! | `time`         | Clock          | system wall clock / manual   |

pub mod config_file;
pub mod json_store;
pub mod log_sink;
pub mod time;
