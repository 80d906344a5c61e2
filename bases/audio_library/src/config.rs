// bases/audio_library/src/config.rs
use blob_store::S3Settings;
use clap::Parser;
use std::path::PathBuf;
use thiserror::Error;

/// Uploads are buffered in memory, so the body limit is the largest accepted file
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Where uploaded audio files are stored
#[derive(Debug, Clone)]
pub enum BlobBackend {
    S3(S3Settings),
    /// Plain files on disk, served by the app itself
    Local { dir: PathBuf },
}

/// Audio library configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// sqlx connection URL of the record database
    pub database_url: String,

    pub blob_backend: BlobBackend,

    pub max_upload_bytes: usize,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("no blob store configured: missing {missing} (or set BLOB_DIR for local storage)")]
    NoBlobBackend { missing: String },
}

/// Audio Library - upload audio files and manage their metadata
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Database connection string, e.g. sqlite://audio.db
    #[arg(long, env = "MONGO_URI")]
    pub database_url: String,

    /// Blob store access key id
    #[arg(long, env = "AWS_ID")]
    pub aws_id: Option<String>,

    /// Blob store secret access key
    #[arg(long, env = "AWS_SECRET", hide_env_values = true)]
    pub aws_secret: Option<String>,

    /// Bucket that receives uploaded files
    #[arg(long, env = "AWS_BUCKET_NAME")]
    pub bucket: Option<String>,

    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Store uploads in this directory instead of S3 (development)
    ///
    /// Only used when the S3 settings are incomplete.
    #[arg(long, env = "BLOB_DIR")]
    pub blob_dir: Option<PathBuf>,

    /// Largest accepted upload request, in bytes
    #[arg(long, env = "MAX_UPLOAD_BYTES", default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,
}

impl Config {
    /// Create configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let blob_backend = match (args.bucket, args.aws_id, args.aws_secret) {
            (Some(bucket), Some(access_key_id), Some(secret_access_key)) => {
                BlobBackend::S3(S3Settings {
                    bucket,
                    region: args.region,
                    access_key_id,
                    secret_access_key,
                })
            }
            (bucket, aws_id, aws_secret) => match args.blob_dir {
                Some(dir) => BlobBackend::Local { dir },
                None => {
                    let missing: Vec<&str> = [
                        ("AWS_BUCKET_NAME", bucket.is_none()),
                        ("AWS_ID", aws_id.is_none()),
                        ("AWS_SECRET", aws_secret.is_none()),
                    ]
                    .into_iter()
                    .filter_map(|(name, absent)| absent.then_some(name))
                    .collect();
                    return Err(ConfigError::NoBlobBackend {
                        missing: missing.join(", "),
                    });
                }
            },
        };

        Ok(Self {
            port: args.port,
            database_url: args.database_url,
            blob_backend,
            max_upload_bytes: args.max_upload_bytes,
        })
    }

    /// Directory to serve blobs from, when they live on local disk
    pub fn local_blob_dir(&self) -> Option<&PathBuf> {
        match &self.blob_backend {
            BlobBackend::Local { dir } => Some(dir),
            BlobBackend::S3(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> CliArgs {
        CliArgs {
            port: 5000,
            database_url: "sqlite::memory:".into(),
            aws_id: None,
            aws_secret: None,
            bucket: None,
            region: "us-east-1".into(),
            blob_dir: None,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    #[test]
    fn full_s3_settings_select_s3() {
        let config = Config::from_args(CliArgs {
            aws_id: Some("AKID".into()),
            aws_secret: Some("secret".into()),
            bucket: Some("beats".into()),
            blob_dir: Some("/tmp/ignored".into()),
            ..args()
        })
        .unwrap();

        match config.blob_backend {
            BlobBackend::S3(ref s3) => {
                assert_eq!(s3.bucket, "beats");
                assert_eq!(s3.region, "us-east-1");
            }
            BlobBackend::Local { .. } => panic!("expected S3 backend"),
        }
        assert!(config.local_blob_dir().is_none());
    }

    #[test]
    fn blob_dir_is_the_fallback() {
        let config = Config::from_args(CliArgs {
            bucket: Some("beats".into()),
            blob_dir: Some("/tmp/blobs".into()),
            ..args()
        })
        .unwrap();

        assert_eq!(config.local_blob_dir(), Some(&PathBuf::from("/tmp/blobs")));
    }

    #[test]
    fn missing_backend_names_missing_variables() {
        let err = Config::from_args(CliArgs {
            aws_id: Some("AKID".into()),
            ..args()
        })
        .unwrap_err();

        assert_eq!(
            err,
            ConfigError::NoBlobBackend {
                missing: "AWS_BUCKET_NAME, AWS_SECRET".into()
            }
        );
    }

    #[test]
    fn default_port_and_upload_limit() {
        let config = Config::from_args(CliArgs {
            blob_dir: Some("/tmp/blobs".into()),
            ..args()
        })
        .unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_upload_bytes, 100 * 1024 * 1024);
    }

    #[test]
    fn cli_flags_parse() {
        let args = CliArgs::try_parse_from([
            "audio_library",
            "--database-url",
            "sqlite://audio.db",
            "--blob-dir",
            "./blobs",
            "--port",
            "8080",
        ])
        .unwrap();
        assert_eq!(args.port, 8080);
        assert_eq!(args.database_url, "sqlite://audio.db");
        assert_eq!(args.blob_dir, Some(PathBuf::from("./blobs")));
    }
}
