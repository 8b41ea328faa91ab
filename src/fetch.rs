//! Structure retrieval from the RCSB data bank, with a local file cache.

use crate::structure::StructureFile;
use crate::utils::write_atomically;
use crate::Error;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Download location of PDB-format entries.
pub const RCSB_URL_PDB: &str = "https://files.rcsb.org/download";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Anything that can supply the lines of a structure by its ID.
pub trait StructureSource: Send + Sync {
    /// Load the structure `id`. Implementations do not retry.
    fn load(&self, id: &str) -> Result<StructureFile, Error>;
}

/// Structure IDs are alphanumeric and case-insensitive; returns the
/// upper-cased form.
pub fn normalize_id(id: &str) -> Result<String, Error> {
    let id = id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::invalid_argument(format!(
            "'{id}' is not a valid structure ID"
        )));
    }
    Ok(id.to_uppercase())
}

/// Name of the cache file of a structure.
pub fn pdb_filename(id: &str) -> String {
    format!("{id}.pdb")
}

/// Fetches `<base_url>/<ID>.pdb` over HTTP.
#[derive(Debug, Clone)]
pub struct RcsbClient {
    client: Client,
    base_url: String,
}

impl RcsbClient {
    /// Client for the given download location, e.g. [`RCSB_URL_PDB`].
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::network("", e))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the PDB-format file of `id`.
    pub fn url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, pdb_filename(id))
    }
}

impl StructureSource for RcsbClient {
    fn load(&self, id: &str) -> Result<StructureFile, Error> {
        let id = normalize_id(id)?;
        let url = self.url(&id);
        debug!("Downloading {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| Error::network(&id, e))?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::not_found(&id)),
            status if !status.is_success() => Err(Error::network(&id, status)),
            _ => {
                let text = response.text().map_err(|e| Error::network(&id, e))?;
                Ok(StructureFile::from_text(&id, &text))
            }
        }
    }
}

/// A directory of `<ID>.pdb` files.
#[derive(Debug, Clone)]
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    /// Cache rooted at `dir`, which is created on the first store.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The cache directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file for `id`.
    pub fn path(&self, id: &str) -> PathBuf {
        self.dir.join(pdb_filename(id))
    }

    /// Whether a local copy of `id` exists.
    pub fn contains(&self, id: &str) -> bool {
        normalize_id(id).is_ok_and(|id| self.path(&id).is_file())
    }

    /// Read the local copy of `id`, or `None` if there is none.
    pub fn get(&self, id: &str) -> Result<Option<StructureFile>, Error> {
        let id = normalize_id(id)?;
        let path = self.path(&id);
        if !path.is_file() {
            return Ok(None);
        }
        let text =
            std::fs::read_to_string(&path).map_err(|e| Error::from_io(e, Some(path.clone())))?;
        Ok(Some(StructureFile::from_text(&id, &text)))
    }

    /// Store `file` as `<ID>.pdb`, replacing any previous copy.
    pub fn store(&self, file: &StructureFile) -> Result<PathBuf, Error> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| Error::from_io(e, Some(self.dir.clone())))?;
        let path = self.path(file.id());
        write_atomically(&path, file.to_text().as_bytes())?;
        Ok(path)
    }
}

/// Reads from a [`LocalCache`] and falls back to a remote source, storing
/// what it downloads.
pub struct CachedSource<S> {
    cache: LocalCache,
    remote: S,
    offline: bool,
}

impl<S: StructureSource> CachedSource<S> {
    /// Serve from `cache`, downloading misses from `remote`.
    pub fn new(cache: LocalCache, remote: S) -> Self {
        Self {
            cache,
            remote,
            offline: false,
        }
    }

    /// Never contact the remote source; cache misses become `NotFound`.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }
}

impl<S: StructureSource> StructureSource for CachedSource<S> {
    fn load(&self, id: &str) -> Result<StructureFile, Error> {
        let id = normalize_id(id)?;
        if let Some(file) = self.cache.get(&id)? {
            debug!("{} exists locally", self.cache.path(&id).display());
            return Ok(file);
        }
        if self.offline {
            debug!("{id} is not cached and retrieval is disabled");
            return Err(Error::not_found(id));
        }

        debug!("{id} not found locally, retrieving");
        let file = self.remote.load(&id)?;
        match self.cache.store(&file) {
            Ok(path) => info!("Saved {id} to {}", path.display()),
            Err(e) => warn!("Could not cache {id}: {e}"),
        }
        Ok(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread::JoinHandle;

    const CA_LINE: &str =
        "ATOM      1  CA  ALA A   1      11.104  13.207   2.104  1.00 20.00           C";

    /// Serves a fixed structure and counts how often it was asked.
    struct FakeRemote {
        calls: AtomicUsize,
    }

    impl StructureSource for FakeRemote {
        fn load(&self, id: &str) -> Result<StructureFile, Error> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match id {
                "1ABC" => Ok(StructureFile::from_text(id, CA_LINE)),
                _ => Err(Error::not_found(id)),
            }
        }
    }

    /// Answer one HTTP request on a local port with `status_line`.
    fn serve_once(status_line: &'static str) -> (String, JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response =
                format!("HTTP/1.1 {status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            stream.write_all(response.as_bytes()).unwrap();
        });
        (format!("http://{addr}"), handle)
    }

    fn local_client(base_url: &str) -> RcsbClient {
        RcsbClient {
            client: Client::builder().no_proxy().build().unwrap(),
            base_url: base_url.to_string(),
        }
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pdbkit-{}-{name}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn structure_ids() {
        assert_eq!(normalize_id(" 1hhp ").unwrap(), "1HHP");
        for bad in ["", "1hh/", "../x", "1 HP"] {
            assert!(
                matches!(normalize_id(bad), Err(Error::InvalidArgument(_))),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(pdb_filename("1HHP"), "1HHP.pdb");
    }

    #[test]
    fn download_url() {
        let client = RcsbClient::new("https://files.rcsb.org/download/").unwrap();
        assert_eq!(client.url("1HHP"), "https://files.rcsb.org/download/1HHP.pdb");
    }

    #[test]
    fn missing_entries_are_not_found() {
        let (base_url, server) = serve_once("404 Not Found");
        let err = local_client(&base_url).load("1abc").unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, Error::NotFound { ref id } if id == "1ABC"), "{err}");
    }

    #[test]
    fn server_errors_are_network_errors() {
        let (base_url, server) = serve_once("500 Internal Server Error");
        let err = local_client(&base_url).load("1abc").unwrap_err();
        server.join().unwrap();
        assert!(matches!(err, Error::Network { ref id, .. } if id == "1ABC"), "{err}");
    }

    #[test]
    fn refused_connections_are_network_errors() {
        // Bind then drop a listener to get a port nobody listens on
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let err = local_client(&format!("http://{addr}"))
            .load("1abc")
            .unwrap_err();
        assert!(matches!(err, Error::Network { .. }), "{err}");
    }

    #[test]
    fn cache_store_and_get() {
        let cache = LocalCache::new(scratch_dir("store"));
        assert!(!cache.contains("1abc"));
        assert_eq!(cache.get("1abc").unwrap(), None);

        let file = StructureFile::from_text("1abc", CA_LINE);
        let path = cache.store(&file).unwrap();
        assert!(path.ends_with("1ABC.pdb"));
        assert!(cache.contains("1abc"));
        assert_eq!(cache.get("1ABC").unwrap(), Some(file));

        let _ = std::fs::remove_dir_all(cache.dir());
    }

    #[test]
    fn cached_source_downloads_once() {
        let cache = LocalCache::new(scratch_dir("once"));
        let source = CachedSource::new(
            cache.clone(),
            FakeRemote {
                calls: AtomicUsize::new(0),
            },
        );

        let first = source.load("1abc").unwrap();
        let second = source.load("1ABC").unwrap();
        assert_eq!(first, second);
        assert_eq!(source.remote.calls.load(Ordering::SeqCst), 1);
        assert!(cache.path("1ABC").is_file());

        assert!(matches!(source.load("9zzz"), Err(Error::NotFound { .. })));
        assert!(!cache.contains("9zzz"));

        let _ = std::fs::remove_dir_all(cache.dir());
    }

    #[test]
    fn parallel_loads_of_one_structure() {
        for round in 0..20 {
            let cache = LocalCache::new(scratch_dir(&format!("parallel-{round}")));
            let source = CachedSource::new(
                cache.clone(),
                FakeRemote {
                    calls: AtomicUsize::new(0),
                },
            );

            std::thread::scope(|s| {
                let handles: Vec<_> = (0..4).map(|_| s.spawn(|| source.load("1abc"))).collect();
                for handle in handles {
                    let file = handle.join().unwrap().unwrap();
                    assert_eq!(file.id(), "1ABC");
                }
            });

            assert_eq!(cache.get("1ABC").unwrap().unwrap().lines(), [CA_LINE]);
            assert_eq!(std::fs::read_dir(cache.dir()).unwrap().count(), 1);
            let _ = std::fs::remove_dir_all(cache.dir());
        }
    }

    #[test]
    fn failed_store_keeps_the_download() {
        let blocker = scratch_dir("blocked");
        std::fs::write(&blocker, "not a directory").unwrap();
        let source = CachedSource::new(
            LocalCache::new(blocker.join("cache")),
            FakeRemote {
                calls: AtomicUsize::new(0),
            },
        );

        let file = source.load("1abc").unwrap();
        assert_eq!(file.lines(), [CA_LINE]);
        assert_eq!(source.remote.calls.load(Ordering::SeqCst), 1);

        let _ = std::fs::remove_file(&blocker);
    }

    #[test]
    fn offline_source_never_retrieves() {
        let source = CachedSource::new(
            LocalCache::new(scratch_dir("offline")),
            FakeRemote {
                calls: AtomicUsize::new(0),
            },
        )
        .offline(true);

        assert!(matches!(source.load("1abc"), Err(Error::NotFound { .. })));
        assert_eq!(source.remote.calls.load(Ordering::SeqCst), 0);
    }
}
