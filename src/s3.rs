use crate::cli::Options;
use s3::{creds::Credentials, Bucket, Region};

const ACCELERATE_ENDPOINT: &str = "https://s3-accelerate.amazonaws.com";

pub fn bucket_for(opts: &Options) -> color_eyre::Result<Box<Bucket>> {
    let credentials = Credentials::new(
        Some(&opts.access_key),
        Some(&opts.secret_key),
        None,
        None,
        None,
    )?;
    let region = region_for(&opts.region, opts.endpoint.as_deref(), opts.accelerate)?;

    let mut bucket = Bucket::new(&opts.bucket, region, credentials)?;
    if opts.path_style {
        bucket = bucket.with_path_style();
    }

    Ok(bucket)
}

pub fn region_for(
    region: &str,
    endpoint: Option<&str>,
    accelerate: bool,
) -> color_eyre::Result<Region> {
    Ok(match endpoint {
        Some(endpoint) => {
            if accelerate {
                warn!("--accelerate is ignored when --endpoint is set");
            }
            Region::Custom {
                region: region.to_owned(),
                endpoint: endpoint.trim_end_matches('/').to_owned(),
            }
        }
        None if accelerate => Region::Custom {
            region: region.to_owned(),
            endpoint: ACCELERATE_ENDPOINT.to_owned(),
        },
        None => region.parse()?,
    })
}
