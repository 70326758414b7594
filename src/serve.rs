//! `serve` command handler.

use chrono::{DateTime, Local, Utc};
use clap::Parser;
use dioxus::prelude::*;
use hyper::{
    header::{CACHE_CONTROL, CONTENT_TYPE, LAST_MODIFIED},
    server::conn::AddrStream,
    service::service_fn,
    Body, Method, Request, Response, StatusCode,
};
use log::{debug, info, LevelFilter};
use std::{
    convert::Infallible, env, error::Error, io::ErrorKind, net::SocketAddr, path::PathBuf,
    sync::Arc,
};
use tokio::{fs::File, io::AsyncReadExt, sync::RwLock};

use crate::{
    model::Site,
    util::{self, address::page_address, db::{PostContent, PostDb}},
    view::{self, NotFoundProps, PostProps},
};

#[derive(Debug, Parser)]
pub struct Serve {
    /// Root directory of the project (containing site.yaml, posts/ and public/)
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Address and port the server will use.
    #[arg(short, long, default_value = "127.0.0.1:4198")]
    address: SocketAddr,

    /// Post cache time-to-live, in seconds. Lower values result in more frequent updates to served content.
    ///
    /// Values below the default are not recommended for production servers.
    #[arg(short = 'c', long, default_value = "300")]
    cache_ttl: u32,

    /// Adjusts the verbosity of the logger.
    #[arg(long, default_value = "warn")]
    pub log_level: LevelFilter,
}

struct Server {
    db: PostDb,
    site: Site,
    public_dir: PathBuf,
}

const ROBOTS_TXT: &str = include_str!("res/robots.txt");

impl Serve {
    pub fn directory(&self) -> Result<PathBuf, std::io::Error> {
        let dir = match &self.directory {
            Some(path) => path.clone(),
            None => env::current_dir()?,
        };
        dunce::canonicalize(dir)
    }

    async fn into_server(self) -> Result<Server, Box<dyn Error>> {
        let dir = self.directory()?;
        let site_file = dir.join("site.yaml");

        let site = if site_file.exists() {
            Site::load(&site_file).await?
        } else {
            info!("No site.yaml in {dir:?}, using defaults");
            Site::default()
        };

        let db = PostDb::new(dir.join("posts"), self.cache_ttl)?;

        // compared against canonical request paths in `public`
        let public_dir = dir.join("public");
        let public_dir = dunce::canonicalize(&public_dir).unwrap_or(public_dir);

        Ok(Server {
            db,
            site,
            public_dir,
        })
    }

    pub async fn run(self) -> Result<(), Box<dyn Error>> {
        let address = self.address;
        let server = Arc::new(RwLock::new(self.into_server().await?));

        let make_service = hyper::service::make_service_fn(|conn: &AddrStream| {
            let client_addr = conn.remote_addr();

            let server = server.clone();

            let service =
                service_fn(move |request| Server::handle(server.clone(), client_addr, request));

            async move { Ok::<_, Infallible>(service) }
        });

        info!("Listening on http://{}", address);

        hyper::Server::bind(&address).serve(make_service).await?;

        Ok(())
    }
}

impl Server {
    async fn handle(
        server: Arc<RwLock<Server>>,
        client_addr: SocketAddr,
        req: Request<Body>,
    ) -> Result<Response<Body>, hyper::http::Error> {
        debug!("{client_addr} {} {:?}", req.method(), req.uri());

        let path = req.uri().path().to_string();

        let result = if req.method() == Method::GET && path.starts_with("/p/") {
            let id = path.split('/').nth(2).unwrap_or("");
            let post = server.write().await.db.refresh(id).await;

            let server = server.read().await;
            match post {
                Ok(Some(post)) => server.post(req, post),
                Ok(None) => server.not_found(req),
                Err(err) => Err(err.into()),
            }
        } else if req.method() == Method::GET && path.starts_with("/public/") {
            let server = server.read().await;
            server.public(req).await
        } else if req.method() == Method::GET && path.to_lowercase() == "/robots.txt" {
            Self::robots()
        } else {
            let server = server.read().await;
            server.not_found(req)
        };

        match result {
            Ok(ok) => Ok(ok),
            Err(err) => {
                let response = Response::builder()
                    .status(StatusCode::INTERNAL_SERVER_ERROR)
                    .body(Body::from(format!("error: {err}")))?;
                Ok(response)
            }
        }
    }

    async fn public(&self, req: Request<Body>) -> Result<Response<Body>, Box<dyn Error>> {
        let subpath = req.uri().path().strip_prefix("/public/").unwrap_or("");
        let path = self.public_dir.join(subpath);

        let is_pem = path.extension().map_or(false, |ext| ext == "pem");

        let is_id_rsa = path
            .file_name()
            .map_or(false, |name| name.to_string_lossy().contains("id_rsa"));

        // Always return 404 for symlinks, files ending in .pem, and files containing id_rsa
        if is_pem || is_id_rsa || path.is_symlink() {
            return self.not_found(req);
        }

        let escapes = dunce::canonicalize(&path)
            .map_or(false, |canonical| !canonical.starts_with(&self.public_dir));
        if escapes {
            return self.not_found(req);
        }

        let mut file = match File::open(&path).await {
            Ok(file) => file,
            Err(err) => {
                if err.kind() == ErrorKind::NotFound {
                    return self.not_found(req);
                } else {
                    return Err(err.into());
                }
            }
        };

        let last_modified = file
            .metadata()
            .await
            .and_then(|meta| meta.modified())
            .map(|lm| DateTime::<Local>::from(lm))
            .ok();

        let cache_valid = last_modified
            .as_ref()
            .map_or(false, |timestamp| util::cache_valid(&req, timestamp));

        if cache_valid {
            return Ok(Response::builder()
                .status(StatusCode::NOT_MODIFIED)
                .body(Body::empty())?);
        }

        let mut body = vec![];
        file.read_to_end(&mut body).await?;

        let resp = Response::builder()
            .status(StatusCode::OK)
            .header(CACHE_CONTROL, "max-age=3600");

        let resp = if let Some(lm) = last_modified {
            resp.header(LAST_MODIFIED, lm.to_rfc2822())
        } else {
            resp
        };

        Ok(resp.body(Body::from(body))?)
    }

    fn post(
        &self,
        req: Request<Body>,
        post: PostContent,
    ) -> Result<Response<Body>, Box<dyn Error>> {
        if util::cache_valid(&req, &post.timestamp) {
            return Ok(Response::builder()
                .status(StatusCode::NOT_MODIFIED)
                .body(Body::empty())?);
        }

        let location = page_address(&self.site, req.uri(), req.headers());
        debug!("Rendering post {} at {location:?}", post.id);
        let last_modified = DateTime::<Utc>::from(post.timestamp).to_rfc2822();

        let vdom = VirtualDom::new_with_props(
            view::post,
            PostProps {
                post,
                site: self.site.clone(),
                location,
            },
        );
        let body = util::render_html(vdom, &self.site.lang);

        Ok(Response::builder()
            .status(StatusCode::OK)
            .header(CACHE_CONTROL, "max-age=3600")
            .header(LAST_MODIFIED, last_modified)
            .header(CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(body))?)
    }

    fn robots() -> Result<Response<Body>, Box<dyn Error>> {
        Ok(Response::builder()
            .status(StatusCode::OK)
            .header(CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Body::from(ROBOTS_TXT))?)
    }

    fn not_found(&self, req: Request<Body>) -> Result<Response<Body>, Box<dyn Error>> {
        let path = req.uri().clone();
        let method = req.method().clone();
        let vdom = VirtualDom::new_with_props(
            view::not_found,
            NotFoundProps {
                path,
                method,
                site_title: self.site.title.clone(),
            },
        );

        Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header(CONTENT_TYPE, "text/html; charset=utf-8")
            .body(Body::from(util::render_html(vdom, &self.site.lang)))?)
    }
}
