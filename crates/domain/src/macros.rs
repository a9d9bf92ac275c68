/// UUID v7 をラップする ID 型を生成する
///
/// 生成されるもの:
/// - `Debug` / `Clone` / `PartialEq` / `Eq` / `Hash` / serde / `Display`（UUID 文字列）
/// - `new()`（時刻順の UUID v7 を採番）と `Default`
/// - `from_uuid()` / `as_uuid()`、および `From<Uuid>`
///
/// ```rust
/// use upkoding_domain::project::UserProjectId;
///
/// let raw = uuid::Uuid::now_v7();
/// let id: UserProjectId = raw.into();
/// assert_eq!(id.as_uuid(), &raw);
/// assert_eq!(id.to_string(), raw.to_string());
/// ```
macro_rules! define_uuid_id {
    (
        $(#[$attr:meta])*
        $vis:vis struct $Id:ident;
    ) => {
        $(#[$attr])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash,
            serde::Serialize, serde::Deserialize,
            derive_more::Display,
        )]
        #[display("{_0}")]
        $vis struct $Id(uuid::Uuid);

        impl $Id {
            pub fn new() -> Self {
                Self(uuid::Uuid::now_v7())
            }

            pub fn from_uuid(raw: uuid::Uuid) -> Self {
                Self(raw)
            }

            pub fn as_uuid(&self) -> &uuid::Uuid {
                &self.0
            }
        }

        impl Default for $Id {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<uuid::Uuid> for $Id {
            fn from(raw: uuid::Uuid) -> Self {
                Self(raw)
            }
        }
    };
}
