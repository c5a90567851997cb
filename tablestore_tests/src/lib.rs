//! Integration tests for `tablestore_core`, split by layer.
