//! Shared fixtures for the runtime integration tests
//!
//! - versioned fixture kinds (`PodV1`, `PodV2`, `Status`) plus an
//!   unregistered `Widget`
//! - `Registry`: a `TypeSource` keyed by Rust type
//! - `PodConversions`: a `ConversionRoutine` copying fields by name
//! - `JsonWire`: JSON serializer/encoder and `JsonDecoder` over serde_json

#![allow(dead_code)]

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use polycodec_core::field::{field_ptr, set_zero_value, FieldAccessor};
use polycodec_core::{
    impl_field_accessor, ApiVersion, ConversionRoutine, Decoder, Encoder, Error, KindVersion,
    Object, Result, TypeMeta, TypeSource,
};
use polycodec_runtime::Serializer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================================================
// Fixture kinds
// ============================================================================

/// A kind with a fixed wire identity
pub trait WireKind: Object + Serialize + DeserializeOwned {
    const VERSION: &'static str;
    const KIND: &'static str;

    fn kind_version() -> KindVersion {
        KindVersion::new(Self::VERSION, Self::KIND)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodV1 {
    pub name: String,
    pub replicas: i32,
}

impl_field_accessor!(PodV1 { name, replicas });

impl WireKind for PodV1 {
    const VERSION: &'static str = "v1";
    const KIND: &'static str = "Pod";
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodV2 {
    pub name: String,
    pub replicas: i32,
    #[serde(default)]
    pub paused: bool,
}

impl_field_accessor!(PodV2 { name, replicas, paused });

impl WireKind for PodV2 {
    const VERSION: &'static str = "v2";
    const KIND: &'static str = "Pod";
}

/// Unversioned kind: the same shape in every version
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Status {
    pub message: String,
}

impl WireKind for Status {
    const VERSION: &'static str = "v1";
    const KIND: &'static str = "Status";
}

/// Known to nobody
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    pub id: u32,
}

pub fn pod_v1(name: &str, replicas: i32) -> Box<dyn Object> {
    Box::new(PodV1 {
        name: name.to_string(),
        replicas,
    })
}

// ============================================================================
// Registry
// ============================================================================

/// Type source backed by a map from Rust type to kind
#[derive(Default)]
pub struct Registry {
    types: HashMap<TypeId, (KindVersion, bool)>,
    extra: HashSet<KindVersion>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<T: WireKind>(mut self, unversioned: bool) -> Self {
        self.types
            .insert(TypeId::of::<T>(), (T::kind_version(), unversioned));
        self
    }

    /// Recognize `kind` without a Rust type behind it
    pub fn recognize(mut self, kind: KindVersion) -> Self {
        self.extra.insert(kind);
        self
    }

    fn lookup(&self, obj: &dyn Object) -> Option<&(KindVersion, bool)> {
        self.types.get(&Any::type_id(obj.as_any()))
    }
}

impl TypeSource for Registry {
    fn kind_of(&self, obj: &dyn Object) -> Result<KindVersion> {
        self.lookup(obj)
            .map(|(kind, _)| kind.clone())
            .ok_or_else(|| Error::type_not_registered(obj.type_name()))
    }

    fn kinds_of(&self, obj: &dyn Object) -> Result<Vec<KindVersion>> {
        self.kind_of(obj).map(|kind| vec![kind])
    }

    fn recognizes(&self, kind: &KindVersion) -> bool {
        self.extra.contains(kind) || self.types.values().any(|(known, _)| known == kind)
    }

    fn is_unversioned(&self, obj: &dyn Object) -> Option<bool> {
        self.lookup(obj).map(|(_, unversioned)| *unversioned)
    }
}

/// The registry most tests use: both pod versions and the unversioned status
pub fn standard_registry() -> Registry {
    Registry::new()
        .register::<PodV1>(false)
        .register::<PodV2>(false)
        .register::<Status>(true)
}

// ============================================================================
// Conversions
// ============================================================================

/// Move every field `dst` also has from `src` into `dst`
fn move_fields<S, D>(src: &mut S, dst: &mut D) -> Result<()>
where
    S: FieldAccessor,
    D: FieldAccessor + Default,
{
    set_zero_value(dst);
    for name in src.field_names() {
        if dst.field(name).is_none() {
            continue;
        }
        if let Ok(value) = field_ptr::<String, _>(src, name) {
            *field_ptr::<String, _>(dst, name)? = std::mem::take(value);
        } else if let Ok(value) = field_ptr::<i32, _>(src, name) {
            *field_ptr::<i32, _>(dst, name)? = *value;
        } else if let Ok(value) = field_ptr::<bool, _>(src, name) {
            *field_ptr::<bool, _>(dst, name)? = *value;
        } else {
            return Err(Error::field_access(format!("unsupported field type for {}", name)));
        }
    }
    Ok(())
}

fn convert_owned<S, D>(mut src: S) -> Result<Box<dyn Object>>
where
    S: FieldAccessor,
    D: FieldAccessor + Default + Object,
{
    let mut dst = D::default();
    move_fields(&mut src, &mut dst)?;
    Ok(Box::new(dst))
}

/// Converts pods between v1 and v2 by field name
pub struct PodConversions;

impl PodConversions {
    fn from_v1(pod: PodV1, target: &ApiVersion) -> Result<Box<dyn Object>> {
        match target.as_str() {
            "v1" => Ok(Box::new(pod)),
            "v2" => convert_owned::<PodV1, PodV2>(pod),
            _ => Err(Error::conversion("v1, Kind=Pod", target, "no conversion path")),
        }
    }

    fn from_v2(pod: PodV2, target: &ApiVersion) -> Result<Box<dyn Object>> {
        match target.as_str() {
            "v1" => convert_owned::<PodV2, PodV1>(pod),
            "v2" => Ok(Box::new(pod)),
            _ => Err(Error::conversion("v2, Kind=Pod", target, "no conversion path")),
        }
    }
}

impl ConversionRoutine for PodConversions {
    fn convert_to_version(&self, obj: &dyn Object, target: &ApiVersion) -> Result<Box<dyn Object>> {
        if let Some(pod) = obj.downcast_ref::<PodV1>() {
            return Self::from_v1(pod.clone(), target);
        }
        if let Some(pod) = obj.downcast_ref::<PodV2>() {
            return Self::from_v2(pod.clone(), target);
        }
        Err(Error::conversion(obj.type_name(), target, "unsupported type"))
    }

    fn convert_to_version_aliased(
        &self,
        obj: Box<dyn Object>,
        target: &ApiVersion,
    ) -> Result<Box<dyn Object>> {
        let obj = match obj.downcast::<PodV1>() {
            Ok(pod) => return Self::from_v1(*pod, target),
            Err(other) => other,
        };
        match obj.downcast::<PodV2>() {
            Ok(pod) => Self::from_v2(*pod, target),
            Err(other) => Err(Error::conversion(other.type_name(), target, "unsupported type")),
        }
    }
}

// ============================================================================
// JSON wire format
// ============================================================================

pub const JSON: &str = "application/json";

#[derive(Serialize, Deserialize)]
struct Wire<T> {
    #[serde(rename = "apiVersion")]
    api_version: String,
    kind: String,
    #[serde(flatten)]
    body: T,
}

fn write_as<T: WireKind>(obj: &dyn Object) -> Option<Result<Vec<u8>>> {
    obj.downcast_ref::<T>().map(|body| {
        let wire = Wire {
            api_version: T::VERSION.to_string(),
            kind: T::KIND.to_string(),
            body,
        };
        serde_json::to_vec(&wire).map_err(|e| Error::serialization(e))
    })
}

/// Render `obj` with its apiVersion/kind header
pub fn to_json(obj: &dyn Object) -> Result<Vec<u8>> {
    write_as::<PodV1>(obj)
        .or_else(|| write_as::<PodV2>(obj))
        .or_else(|| write_as::<Status>(obj))
        .unwrap_or_else(|| Err(Error::type_not_registered(obj.type_name())))
}

/// JSON serializer that writes objects in the version they are in
#[derive(Debug, Default)]
pub struct JsonWire;

impl Serializer for JsonWire {
    fn serialize(&self, obj: &dyn Object) -> Result<Vec<u8>> {
        to_json(obj)
    }

    fn content_type(&self) -> Option<&str> {
        Some(JSON)
    }
}

impl Encoder for JsonWire {
    fn encode(&self, obj: &dyn Object, _overrides: &[ApiVersion]) -> Result<Vec<u8>> {
        to_json(obj)
    }

    fn content_type(&self) -> Option<&str> {
        Some(JSON)
    }
}

type ReadFn = fn(&[u8]) -> Result<Box<dyn Object>>;

fn read_as<T: WireKind>(data: &[u8]) -> Result<Box<dyn Object>> {
    let wire: Wire<T> = serde_json::from_slice(data).map_err(|e| Error::serialization(e))?;
    Ok(Box::new(wire.body))
}

fn read_type_meta(data: &[u8]) -> Result<KindVersion> {
    let meta: TypeMeta = serde_json::from_slice(data).map_err(|e| Error::serialization(e))?;
    meta.kind_version()
        .ok_or_else(|| Error::serialization("missing apiVersion or kind"))
}

/// JSON decoder owning a fixed set of kinds
#[derive(Default)]
pub struct JsonDecoder {
    readers: HashMap<KindVersion, ReadFn>,
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: WireKind>(mut self) -> Self {
        self.readers.insert(T::kind_version(), read_as::<T>);
        self
    }
}

impl Decoder for JsonDecoder {
    fn decode(&self, data: &[u8]) -> Result<Box<dyn Object>> {
        let kind = read_type_meta(data)?;
        let read = self
            .readers
            .get(&kind)
            .ok_or_else(|| Error::kind_not_registered(kind.clone()))?;
        read(data)
    }

    fn decode_metadata_into(&self, data: &[u8], meta: &mut TypeMeta) -> Result<()> {
        let kind = read_type_meta(data)?;
        meta.set_kind_version(&kind);
        Ok(())
    }
}

/// Decoder for every fixture kind
pub fn full_decoder() -> Arc<dyn Decoder> {
    Arc::new(
        JsonDecoder::new()
            .with::<PodV1>()
            .with::<PodV2>()
            .with::<Status>(),
    )
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}
