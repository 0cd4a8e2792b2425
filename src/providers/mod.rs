pub mod exchangerate_api;
