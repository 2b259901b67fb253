pub(crate) mod loops;
