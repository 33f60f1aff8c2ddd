//! Variant registry.
//!
//! Every persistence backend and transport protocol is described exactly
//! once by a static descriptor. The synthesis engine has one generic
//! algorithm per layer and reads everything variant-specific from here.
//!
//! # Adding a backend or transport
//!
//! 1. Add a variant to [`BackendKind`] or [`TransportKind`]
//! 2. Add one descriptor row to [`BACKEND_REGISTRY`] or [`TRANSPORT_REGISTRY`]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::contract::Role;
use crate::domain::error::DomainError;

// ── Kinds ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Mysql,
    Postgres,
    Mongodb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    Http,
    Gin,
    Echo,
    Fiber,
}

impl BackendKind {
    pub const ALL: [BackendKind; 3] = [Self::Mysql, Self::Postgres, Self::Mongodb];

    pub fn descriptor(self) -> &'static BackendDescriptor {
        // Registry integrity is checked by tests; every kind has a row.
        BACKEND_REGISTRY
            .iter()
            .find(|d| d.kind == self)
            .unwrap_or(&BACKEND_REGISTRY[0])
    }

    pub fn as_str(self) -> &'static str {
        self.descriptor().package
    }
}

impl TransportKind {
    pub const ALL: [TransportKind; 4] = [Self::Http, Self::Gin, Self::Echo, Self::Fiber];

    pub fn descriptor(self) -> &'static TransportDescriptor {
        TRANSPORT_REGISTRY
            .iter()
            .find(|d| d.kind == self)
            .unwrap_or(&TRANSPORT_REGISTRY[0])
    }

    pub fn as_str(self) -> &'static str {
        self.descriptor().package
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_ascii_lowercase();
        BACKEND_REGISTRY
            .iter()
            .find(|d| d.package == needle || d.aliases.contains(&needle.as_str()))
            .map(|d| d.kind)
            .ok_or_else(|| DomainError::UnknownVariant {
                what: "backend",
                value: s.to_string(),
                available: BACKEND_REGISTRY.iter().map(|d| d.package).collect(),
            })
    }
}

impl FromStr for TransportKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.to_ascii_lowercase();
        TRANSPORT_REGISTRY
            .iter()
            .find(|d| d.package == needle || d.aliases.contains(&needle.as_str()))
            .map(|d| d.kind)
            .ok_or_else(|| DomainError::UnknownVariant {
                what: "transport",
                value: s.to_string(),
                available: TRANSPORT_REGISTRY.iter().map(|d| d.package).collect(),
            })
    }
}

// ── Variant ──────────────────────────────────────────────────────────────────

/// One synthesis target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "layer", content = "kind", rename_all = "lowercase")]
pub enum Variant {
    Persistence(BackendKind),
    Transport(TransportKind),
    /// The usecase implementation sitting between transport and persistence.
    Service,
}

impl Variant {
    /// The role whose interface this variant implements (or, for
    /// transports, wraps).
    pub const fn default_role(self) -> Role {
        match self {
            Self::Persistence(_) => Role::Repository,
            Self::Transport(_) | Self::Service => Role::Usecase,
        }
    }

    /// Whether this variant can be rendered against `role`.
    pub const fn supports(self, role: Role) -> bool {
        match self {
            Self::Persistence(_) | Self::Transport(_) => true,
            Self::Service => matches!(role, Role::Usecase),
        }
    }

    /// Output layer directory.
    pub const fn layer(self) -> &'static str {
        match self {
            Self::Persistence(_) => "repository",
            Self::Transport(_) => "delivery",
            Self::Service => "usecase",
        }
    }

    /// Go package name of the generated file.
    pub fn package(self) -> &'static str {
        match self {
            Self::Persistence(kind) => kind.as_str(),
            Self::Transport(kind) => kind.as_str(),
            Self::Service => "usecase",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistence(kind) => write!(f, "persistence/{kind}"),
            Self::Transport(kind) => write!(f, "transport/{kind}"),
            Self::Service => f.write_str("service"),
        }
    }
}

// ── Backend descriptors ──────────────────────────────────────────────────────

/// Everything persistence synthesis needs to know about one backend.
#[derive(Debug, Clone, Copy)]
pub struct BackendDescriptor {
    pub kind: BackendKind,
    /// Go package and directory name.
    pub package: &'static str,
    /// Accepted spellings besides `package`.
    pub aliases: &'static [&'static str],
    pub display_name: &'static str,
    /// Lower-case prefix of the private struct (`mysqlExampleRepository`).
    pub struct_prefix: &'static str,
    /// Prefix of the constructor after `New` (`NewMysqlExampleRepository`).
    pub constructor_prefix: &'static str,
    /// Import providing the client type.
    pub client_import: &'static str,
    pub client_type: &'static str,
    /// Struct field holding the handle.
    pub field: &'static str,
    /// Constructor parameter name.
    pub param: &'static str,
}

pub static BACKEND_REGISTRY: &[BackendDescriptor] = &[
    BackendDescriptor {
        kind: BackendKind::Mysql,
        package: "mysql",
        aliases: &["mariadb"],
        display_name: "MySQL",
        struct_prefix: "mysql",
        constructor_prefix: "Mysql",
        client_import: "database/sql",
        client_type: "*sql.DB",
        field: "Conn",
        param: "conn",
    },
    BackendDescriptor {
        kind: BackendKind::Postgres,
        package: "postgres",
        aliases: &["postgresql", "pg"],
        display_name: "PostgreSQL",
        struct_prefix: "postgres",
        constructor_prefix: "Postgres",
        client_import: "database/sql",
        client_type: "*sql.DB",
        field: "Conn",
        param: "conn",
    },
    BackendDescriptor {
        kind: BackendKind::Mongodb,
        package: "mongodb",
        aliases: &["mongo"],
        display_name: "MongoDB",
        struct_prefix: "mongo",
        constructor_prefix: "Mongo",
        client_import: "go.mongodb.org/mongo-driver/mongo",
        client_type: "*mongo.Database",
        field: "DB",
        param: "db",
    },
];

// ── Transport descriptors ────────────────────────────────────────────────────

/// Everything transport synthesis needs to know about one protocol.
///
/// Template fields use `{method}` for the handler method name and `{path}`
/// for the route path.
#[derive(Debug, Clone, Copy)]
pub struct TransportDescriptor {
    pub kind: TransportKind,
    pub package: &'static str,
    pub aliases: &'static [&'static str],
    pub display_name: &'static str,
    pub imports: &'static [&'static str],
    /// First constructor parameter: the router being registered on.
    pub router_param: &'static str,
    /// One registration statement per method.
    pub register: &'static str,
    /// Handler parameter list and result, after the method name.
    pub handler_signature: &'static str,
    /// Handler body lines, each indented one level by the renderer.
    pub respond: &'static [&'static str],
}

pub static TRANSPORT_REGISTRY: &[TransportDescriptor] = &[
    TransportDescriptor {
        kind: TransportKind::Http,
        package: "http",
        aliases: &["net/http", "nethttp", "std"],
        display_name: "net/http",
        imports: &["net/http"],
        router_param: "mux *http.ServeMux",
        register: "mux.HandleFunc(\"{path}\", handler.{method})",
        handler_signature: "(w http.ResponseWriter, r *http.Request)",
        respond: &[
            "w.Header().Set(\"Content-Type\", \"application/json\")",
            "w.WriteHeader(http.StatusOK)",
            "_, _ = w.Write([]byte(`{\"message\":\"{method}\"}`))",
        ],
    },
    TransportDescriptor {
        kind: TransportKind::Gin,
        package: "gin",
        aliases: &[],
        display_name: "Gin",
        imports: &["net/http", "github.com/gin-gonic/gin"],
        router_param: "router *gin.Engine",
        register: "router.POST(\"{path}\", handler.{method})",
        handler_signature: "(c *gin.Context)",
        respond: &["c.JSON(http.StatusOK, gin.H{\"message\": \"{method}\"})"],
    },
    TransportDescriptor {
        kind: TransportKind::Echo,
        package: "echo",
        aliases: &[],
        display_name: "Echo",
        imports: &["net/http", "github.com/labstack/echo/v4"],
        router_param: "e *echo.Echo",
        register: "e.POST(\"{path}\", handler.{method})",
        handler_signature: "(c echo.Context) error",
        respond: &["return c.JSON(http.StatusOK, map[string]string{\"message\": \"{method}\"})"],
    },
    TransportDescriptor {
        kind: TransportKind::Fiber,
        package: "fiber",
        aliases: &[],
        display_name: "Fiber",
        imports: &["github.com/gofiber/fiber/v2"],
        router_param: "app *fiber.App",
        register: "app.Post(\"{path}\", handler.{method})",
        handler_signature: "(c *fiber.Ctx) error",
        respond: &["return c.Status(fiber.StatusOK).JSON(fiber.Map{\"message\": \"{method}\"})"],
    },
];
