pub(crate) mod issues;
