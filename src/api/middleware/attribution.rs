//! Attribution middleware
//!
//! 在所有 handler 之前解析 `?ref=`，把本次请求的归因结果放进 request extensions，
//! 解析成功时在响应上写 Cookie。handler 通过 [`AttributionContext`] 提取归因值，
//! 没有挂载该中间件时提取会失败。

use std::rc::Rc;
use std::sync::Arc;

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, ServiceRequest, ServiceResponse},
    error::ErrorInternalServerError,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{error, warn};

use crate::config::AttributionConfig;
use crate::services::attribution::{AttributionWrite, resolve_and_store_attribution};
use crate::storage::IdentityStore;

/// 当前请求看到的归因值（推广员 id 字符串）
///
/// 包含本次请求刚解析出的值；没有解析时为请求携带的 Cookie 值
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributionContext {
    pub agent_id: Option<String>,
}

impl AttributionContext {
    pub fn as_deref(&self) -> Option<&str> {
        self.agent_id.as_deref()
    }
}

impl FromRequest for AttributionContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let ctx = req.extensions().get::<AttributionContext>().cloned();
        ready(ctx.ok_or_else(|| {
            error!("AttributionContext requested but attribution middleware is not installed");
            ErrorInternalServerError("attribution unavailable")
        }))
    }
}

/// 归因中间件工厂
#[derive(Clone)]
pub struct AttributionLayer {
    store: Arc<dyn IdentityStore>,
    config: Arc<AttributionConfig>,
}

impl AttributionLayer {
    pub fn new(store: Arc<dyn IdentityStore>, config: AttributionConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AttributionLayer
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AttributionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AttributionMiddleware {
            service: Rc::new(service),
            store: self.store.clone(),
            config: self.config.clone(),
        }))
    }
}

pub struct AttributionMiddleware<S> {
    service: Rc<S>,
    store: Arc<dyn IdentityStore>,
    config: Arc<AttributionConfig>,
}

impl<S, B> Service<ServiceRequest> for AttributionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let store = self.store.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let existing = req
                .cookie(&config.cookie_name)
                .map(|c| c.value().to_string());

            let resolved = resolve_and_store_attribution(
                store.as_ref(),
                &config,
                req.query_string(),
                existing.as_deref(),
            )
            .await;

            // 查询失败不影响请求本身，沿用已有归因
            let write = match resolved {
                Ok(write) => write,
                Err(e) => {
                    warn!("Attribution lookup failed, keeping existing value: {}", e);
                    AttributionWrite::Unchanged { existing }
                }
            };

            req.extensions_mut().insert(AttributionContext {
                agent_id: write.effective_value(),
            });

            let mut res = srv.call(req).await?;

            if let Some(cookie) = write.cookie()
                && let Err(e) = res.response_mut().add_cookie(cookie)
            {
                warn!("Failed to write attribution cookie: {}", e);
            }

            Ok(res)
        })
    }
}
