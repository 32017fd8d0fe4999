use color_eyre::eyre::{bail, WrapErr};
use futures::{stream, StreamExt};
use new_mime_guess::MimeGuess;
use s3::Bucket;
use std::path::{Component, Path, PathBuf};
use tokio::{fs::File, io::AsyncReadExt};
use walkdir::WalkDir;

///What we were pointed at on disk, so the caller can pick the right upload path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Directory(PathBuf),
}

impl Source {
    pub fn resolve(path: &Path) -> color_eyre::Result<Self> {
        let metadata =
            std::fs::metadata(path).wrap_err_with(|| format!("unable to stat {path:?}"))?;

        Ok(if metadata.is_dir() {
            Self::Directory(path.to_path_buf())
        } else {
            Self::File(path.to_path_buf())
        })
    }
}

struct Entry {
    key: String,
    contents: Vec<u8>,
    mime_guess: MimeGuess,
}

async fn read_file(pb: &Path, key: String) -> color_eyre::Result<Entry> {
    trace!(?pb, "Reading file");

    let contents: Vec<u8> = {
        let mut file = File::open(pb)
            .await
            .wrap_err_with(|| format!("unable to open {pb:?}"))?;
        let mut contents = vec![];
        let mut tmp = [0_u8; 1024];
        loop {
            match file.read(&mut tmp).await? {
                0 => break,
                n => {
                    contents.extend(&tmp[0..n]);
                }
            }
        }
        contents
    };

    info!(len=contents.len(), ?pb, "Read file");

    Ok(Entry {
        key,
        contents,
        mime_guess: new_mime_guess::from_path(pb),
    })
}

async fn write_file_to_bucket(
    bucket: &Bucket,
    Entry {
        key,
        contents,
        mime_guess,
    }: Entry,
) -> color_eyre::Result<()> {
    let content_type = mime_guess.first_or_octet_stream();
    let rsp = bucket
        .put_object_with_content_type(&key, &contents, content_type.essence_str())
        .await?;
    info!(?key, ?content_type, code=%rsp.status_code(), "Uploaded to S3");

    Ok(())
}

pub async fn upload_file_to_bucket(
    bucket: &Bucket,
    file: &Path,
    key: &str,
    delete_existing: bool,
) -> color_eyre::Result<()> {
    if delete_existing {
        match bucket.delete_object(key).await {
            Ok(rsp) => info!(?key, code=%rsp.status_code(), "Deleted existing object"),
            Err(e) => warn!(?key, ?e, "Unable to delete existing object"),
        }
    }

    let entry = read_file(file, key.to_owned()).await?;
    write_file_to_bucket(bucket, entry).await
}

pub async fn upload_dir_to_bucket(
    bucket: &Bucket,
    dir: &Path,
    prefix: &str,
    concurrency: usize,
) -> color_eyre::Result<()> {
    let files = collect_files(dir, prefix)?;
    info!(count=files.len(), ?dir, "Uploading directory");

    let mut futures = stream::iter(files.iter().map(|(pb, key)| async move {
        let entry = read_file(pb, key.clone()).await?;
        write_file_to_bucket(bucket, entry).await
    }))
    .buffer_unordered(concurrency);

    while let Some(res) = futures.next().await {
        res?;
    }

    info!("All uploaded to S3");

    Ok(())
}

pub fn collect_files(dir: &Path, prefix: &str) -> color_eyre::Result<Vec<(PathBuf, String)>> {
    let mut files = vec![];

    for item in WalkDir::new(dir) {
        let pb = item?.path().to_path_buf();
        if !pb.is_file() {
            continue;
        }

        let relative = pb.strip_prefix(dir)?;
        let key = object_key(prefix, relative)?;
        files.push((pb, key));
    }

    Ok(files)
}

pub fn object_key(prefix: &str, relative: &Path) -> color_eyre::Result<String> {
    let mut parts = vec![];
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let Some(part) = part.to_str() else {
                    bail!("non-UTF-8 path component in {relative:?}");
                };
                parts.push(part);
            }
            other => bail!("unexpected path component {other:?} in {relative:?}"),
        }
    }

    //the prefix is concatenated verbatim, "public/" and "public" give different keys
    Ok(format!("{prefix}{}", parts.join("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn resolve_picks_the_directory_branch() -> color_eyre::Result<()> {
        let dir = TempDir::new()?;

        let source = Source::resolve(dir.path())?;

        assert_eq!(source, Source::Directory(dir.path().to_path_buf()));
        Ok(())
    }

    #[test]
    fn resolve_picks_the_file_branch() -> color_eyre::Result<()> {
        let dir = TempDir::new()?;
        let file = dir.path().join("archive.tar.gz");
        fs::write(&file, b"not really a tarball")?;

        let source = Source::resolve(&file)?;

        assert_eq!(source, Source::File(file));
        Ok(())
    }

    #[test]
    fn resolve_fails_for_missing_paths() {
        let missing = Path::new("/definitely/not/a/real/path");
        assert!(Source::resolve(missing).is_err());
    }

    #[test]
    fn object_keys_concatenate_the_prefix_verbatim() -> color_eyre::Result<()> {
        assert_eq!(object_key("public/", Path::new("a/b.txt"))?, "public/a/b.txt");
        assert_eq!(object_key("v1-", Path::new("index.html"))?, "v1-index.html");
        assert_eq!(object_key("", Path::new("a.txt"))?, "a.txt");
        Ok(())
    }

    #[test]
    fn collect_files_maps_every_regular_file() -> color_eyre::Result<()> {
        let dir = TempDir::new()?;
        fs::create_dir_all(dir.path().join("assets/img"))?;
        fs::write(dir.path().join("index.html"), "<html></html>")?;
        fs::write(dir.path().join("assets/style.css"), "body {}")?;
        fs::write(dir.path().join("assets/img/logo.png"), [0_u8; 4])?;

        let files = collect_files(dir.path(), "site/")?;
        let mut keys: Vec<String> = files.into_iter().map(|(_, key)| key).collect();
        keys.sort();

        assert_eq!(
            keys,
            [
                "site/assets/img/logo.png",
                "site/assets/style.css",
                "site/index.html"
            ]
        );
        Ok(())
    }

    #[test]
    fn collect_files_skips_directories() -> color_eyre::Result<()> {
        let dir = TempDir::new()?;
        fs::create_dir_all(dir.path().join("empty/nested"))?;

        let files = collect_files(dir.path(), "")?;

        assert!(files.is_empty());
        Ok(())
    }

    #[test]
    fn collect_files_propagates_traversal_errors() {
        let missing = Path::new("/definitely/not/a/real/dir");
        assert!(collect_files(missing, "").is_err());
    }
}
