cfg_loom! {
    pub(crate) use loom::sync::atomic;
    #[cfg(test)]
    pub(crate) use loom::sync::Arc;
}

cfg_not_loom! {
    pub(crate) use std::sync::atomic;
}
