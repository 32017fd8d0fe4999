use clap::Parser;
use heave::{
    cli::Options,
    s3::bucket_for,
    setup,
    upload::{upload_dir_to_bucket, upload_file_to_bucket, Source},
};

#[macro_use]
extern crate tracing;

fn main() -> color_eyre::Result<()> {
    let opts = Options::parse();
    setup();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("unable to build runtime");

    runtime.block_on(run(opts))
}

async fn run(opts: Options) -> color_eyre::Result<()> {
    let source = Source::resolve(&opts.local_path)?;
    let bucket = bucket_for(&opts)?;

    let outcome = match source {
        Source::File(path) => {
            upload_file_to_bucket(&bucket, &path, &opts.dest_path, opts.delete_existing).await
        }
        Source::Directory(path) => {
            if opts.delete_existing {
                warn!("--delete-existing only applies to single files, ignoring");
            }
            upload_dir_to_bucket(&bucket, &path, &opts.dest_path, opts.concurrency).await
        }
    };

    match outcome {
        Ok(()) => info!("Upload complete"),
        Err(e) => error!(?e, "Error uploading"),
    }

    Ok(())
}
