//! Static route table.

use std::fmt;

/// Logical route of a remote operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Account(AccountRoute),
    Page(PageRoute),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccountRoute {
    Register,
    Connect,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageRoute {
    Create,
    Update,
    Delete,
    Get,
    List,
}

impl Route {
    pub const REGISTER: Route = Route::Account(AccountRoute::Register);
    pub const CONNECT: Route = Route::Account(AccountRoute::Connect);
    pub const PAGE_CREATE: Route = Route::Page(PageRoute::Create);
    pub const PAGE_UPDATE: Route = Route::Page(PageRoute::Update);
    pub const PAGE_DELETE: Route = Route::Page(PageRoute::Delete);
    pub const PAGE_GET: Route = Route::Page(PageRoute::Get);
    pub const PAGE_LIST: Route = Route::Page(PageRoute::List);

    /// Every route the adapter can call.
    pub const ALL: [Route; 7] = [
        Self::REGISTER,
        Self::CONNECT,
        Self::PAGE_CREATE,
        Self::PAGE_UPDATE,
        Self::PAGE_DELETE,
        Self::PAGE_GET,
        Self::PAGE_LIST,
    ];

    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Account(_) => "Accounts",
            Self::Page(_) => "Pages",
        }
    }

    pub fn operation(&self) -> &'static str {
        match self {
            Self::Account(AccountRoute::Register) => "Register",
            Self::Account(AccountRoute::Connect) => "Connect",
            Self::Page(PageRoute::Create) => "PageCreate",
            Self::Page(PageRoute::Update) => "PageUpdate",
            Self::Page(PageRoute::Delete) => "PageDelete",
            Self::Page(PageRoute::Get) => "PageGet",
            Self::Page(PageRoute::List) => "PageList",
        }
    }

    /// Parse a `/<Namespace>/<Operation>` path back into a route.
    pub fn from_path(path: &str) -> Option<Route> {
        Self::ALL.into_iter().find(|r| r.to_string() == path)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.namespace(), self.operation())
    }
}
