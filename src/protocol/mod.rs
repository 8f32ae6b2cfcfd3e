//! Protocol Module
//!
//! The surface the host uses to invoke the contract: a function name plus
//! string arguments in, a status and JSON payload out.
//!
//! ### Functions
//! - `Init`                     - args: none
//! - `CreateOrUpdateContainer`  - args: uid, cid
//! - `ReadContainer`            - args: uid
//! - `DeleteContainer`          - args: uid
//! - `ContainerExists`          - args: uid
//! - `ReadContainerHistory`     - args: uid
//! - `GetAllContainers`         - args: none
//! - `GetAllContainersHistory`  - args: none
//!
//! ### Status Codes
//! - 0x00: OK
//! - 0x01: NOT_FOUND
//! - 0x02: ERROR

mod invocation;
mod response;
mod codec;

pub use invocation::{Function, Invocation};
pub use response::{Response, Status};
pub use codec::{
    encode_bool, encode_container, encode_container_histories, encode_containers,
    decode_bool, decode_container, decode_container_histories, decode_containers,
};
