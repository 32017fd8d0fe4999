use clap::{builder::NonEmptyStringValueParser, Parser};
use std::path::PathBuf;

/// Upload a local file or directory to an S3-compatible bucket.
#[derive(Parser, Debug, Clone)]
#[command(name = "heave", version, about, long_about = None)]
pub struct Options {
    /// Access key for the bucket
    #[arg(long = "ak", value_name = "KEY", value_parser = NonEmptyStringValueParser::new())]
    pub access_key: String,

    /// Secret key for the bucket
    #[arg(long = "sk", alias = "ssk", value_name = "KEY", value_parser = NonEmptyStringValueParser::new())]
    pub secret_key: String,

    /// Bucket to upload into
    #[arg(long, value_name = "NAME", value_parser = NonEmptyStringValueParser::new())]
    pub bucket: String,

    /// Local file or directory to upload
    #[arg(long = "localpath", value_name = "PATH")]
    pub local_path: PathBuf,

    /// Destination object key, used as a verbatim key prefix when uploading a directory
    #[arg(long = "destpath", value_name = "KEY", value_parser = NonEmptyStringValueParser::new())]
    pub dest_path: String,

    /// Region the bucket lives in
    #[arg(long, value_name = "REGION", default_value = "us-east-1", value_parser = NonEmptyStringValueParser::new())]
    pub region: String,

    /// Endpoint of an S3-compatible provider, scheme included
    #[arg(long, value_name = "URL", value_parser = NonEmptyStringValueParser::new())]
    pub endpoint: Option<String>,

    /// Upload through the transfer-acceleration endpoint
    #[arg(long)]
    pub accelerate: bool,

    /// Use path-style addressing, for providers without subdomain buckets
    #[arg(long)]
    pub path_style: bool,

    /// Delete any existing object at the destination key before uploading a file
    #[arg(long)]
    pub delete_existing: bool,

    /// How many objects to upload at once when uploading a directory
    #[arg(long, value_name = "N", default_value_t = 16, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub concurrency: usize,
}
