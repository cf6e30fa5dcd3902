mod helpers;

mod feed_test;
mod writer_test;
