use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{entities::token::Identity, errors::AppError};

/// The authenticated caller. Rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct AuthIdentity(pub Identity);

impl FromRequest for AuthIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Identity>() {
            Some(identity) => ready(Ok(AuthIdentity(identity.clone()))),
            None => ready(Err(AppError::UnauthorizedAccess)),
        }
    }
}

/// An authenticated administrator.
/// 401 when nobody is logged in, 403 for everyone else.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Identity);

impl FromRequest for AdminIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        match req.extensions().get::<Identity>() {
            Some(identity) if identity.is_admin => ready(Ok(AdminIdentity(identity.clone()))),
            Some(_) => ready(Err(AppError::ForbiddenAccess)),
            None => ready(Err(AppError::UnauthorizedAccess)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[actix_rt::test]
    async fn admin_extractor_distinguishes_401_from_403() {
        let anonymous = TestRequest::default().to_http_request();
        let result = AdminIdentity::extract(&anonymous).await;
        assert!(matches!(result, Err(AppError::UnauthorizedAccess)));

        let customer = TestRequest::default().to_http_request();
        customer.extensions_mut().insert(Identity::customer(7, "fan_seven"));
        let result = AdminIdentity::extract(&customer).await;
        assert!(matches!(result, Err(AppError::ForbiddenAccess)));

        let admin = TestRequest::default().to_http_request();
        admin.extensions_mut().insert(Identity::admin("root"));
        assert!(AdminIdentity::extract(&admin).await.is_ok());
        assert!(AuthIdentity::extract(&admin).await.is_ok());
    }
}
