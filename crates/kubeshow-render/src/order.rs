//! Canonical ordering of rendered documents
//!
//! Documents are grouped by the category of their `kind` so that
//! prerequisites come first when the set is applied in sequence:
//!
//! ```text
//! Namespace → Crd → Rbac → Config → Workload → Network → Other → Hook
//! ```
//!
//! The precedence lives in an [`OrderTable`], an ordered list of matchers,
//! so it can be inspected and extended without touching the sort. Within a
//! category documents keep the order in which they appeared in the blob.

use crate::split::{SplitDocument, SplitManifests};

/// Resource category used for ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindCategory {
    Namespace,
    /// CustomResourceDefinition
    Crd,
    /// Service accounts, roles and bindings
    Rbac,
    /// Configuration, quota and storage
    Config,
    Workload,
    Network,
    /// Any kind not listed in the table
    Other,
    /// Documents from the hook section of the blob
    Hook,
}

/// Kinds belonging to one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindMatcher {
    pub category: KindCategory,
    pub kinds: Vec<String>,
}

impl KindMatcher {
    pub fn new(category: KindCategory, kinds: &[&str]) -> Self {
        Self {
            category,
            kinds: kinds.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn matches(&self, kind: &str) -> bool {
        self.kinds.iter().any(|k| k == kind)
    }
}

/// Default precedence, highest priority first
pub const DEFAULT_ORDER: &[(KindCategory, &[&str])] = &[
    (KindCategory::Namespace, &["Namespace"]),
    (KindCategory::Crd, &["CustomResourceDefinition"]),
    (
        KindCategory::Rbac,
        &[
            "PodSecurityPolicy",
            "ServiceAccount",
            "ClusterRole",
            "ClusterRoleList",
            "ClusterRoleBinding",
            "ClusterRoleBindingList",
            "Role",
            "RoleList",
            "RoleBinding",
            "RoleBindingList",
        ],
    ),
    (
        KindCategory::Config,
        &[
            "ResourceQuota",
            "LimitRange",
            "PodDisruptionBudget",
            "Secret",
            "SecretList",
            "ConfigMap",
            "StorageClass",
            "PersistentVolume",
            "PersistentVolumeClaim",
        ],
    ),
    (
        KindCategory::Workload,
        &[
            "DaemonSet",
            "Pod",
            "ReplicationController",
            "ReplicaSet",
            "Deployment",
            "HorizontalPodAutoscaler",
            "StatefulSet",
            "Job",
            "CronJob",
        ],
    ),
    (
        KindCategory::Network,
        &[
            "NetworkPolicy",
            "Service",
            "IngressClass",
            "Ingress",
            "APIService",
        ],
    ),
    (KindCategory::Other, &[]),
    (KindCategory::Hook, &[]),
];

/// Ordered list of category matchers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTable {
    matchers: Vec<KindMatcher>,
}

impl Default for OrderTable {
    fn default() -> Self {
        Self::new(
            DEFAULT_ORDER
                .iter()
                .map(|(category, kinds)| KindMatcher::new(*category, kinds))
                .collect(),
        )
    }
}

impl OrderTable {
    /// Build a table from matchers listed highest priority first
    pub fn new(matchers: Vec<KindMatcher>) -> Self {
        Self { matchers }
    }

    pub fn matchers(&self) -> &[KindMatcher] {
        &self.matchers
    }

    /// Register a kind under `category`
    ///
    /// The kind is removed from any other category first, so this also moves
    /// a kind already in the table. A category missing from the table is
    /// appended at the end.
    pub fn with_kind(mut self, category: KindCategory, kind: impl Into<String>) -> Self {
        let kind = kind.into();
        for matcher in &mut self.matchers {
            matcher.kinds.retain(|k| *k != kind);
        }
        match self.matchers.iter_mut().find(|m| m.category == category) {
            Some(matcher) => matcher.kinds.push(kind),
            None => self.matchers.push(KindMatcher {
                category,
                kinds: vec![kind],
            }),
        }
        self
    }

    /// Category of a kind outside the hook section
    pub fn category_of_kind(&self, kind: &str) -> KindCategory {
        self.matchers
            .iter()
            .find(|m| m.matches(kind))
            .map(|m| m.category)
            .unwrap_or(KindCategory::Other)
    }

    /// Category of a split document
    pub fn category_of(&self, doc: &SplitDocument) -> KindCategory {
        if doc.is_hook() {
            return KindCategory::Hook;
        }
        doc.kind()
            .map(|kind| self.category_of_kind(kind))
            .unwrap_or(KindCategory::Other)
    }

    /// Rank of a category; categories absent from the table rank last
    pub fn priority(&self, category: KindCategory) -> usize {
        self.matchers
            .iter()
            .position(|m| m.category == category)
            .unwrap_or(self.matchers.len())
    }

    /// Sort documents into canonical order
    pub fn sort<I>(&self, docs: I) -> OrderedDocumentSet
    where
        I: IntoIterator<Item = SplitDocument>,
    {
        let mut docs: Vec<SplitDocument> = docs.into_iter().collect();
        docs.sort_by_key(|doc| (self.priority(self.category_of(doc)), doc.key()));
        OrderedDocumentSet { docs }
    }
}

/// Documents in canonical order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderedDocumentSet {
    docs: Vec<SplitDocument>,
}

impl OrderedDocumentSet {
    /// Order split manifests with the default table
    pub fn from_manifests(manifests: SplitManifests) -> Self {
        OrderTable::default().sort(manifests.into_values())
    }

    /// Re-sort with another table
    pub fn reorder(self, table: &OrderTable) -> Self {
        table.sort(self.docs)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SplitDocument> {
        self.docs.iter()
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn as_slice(&self) -> &[SplitDocument] {
        &self.docs
    }

    /// Documents whose source header could not be parsed
    pub fn malformed(&self) -> impl Iterator<Item = &SplitDocument> {
        self.docs.iter().filter(|d| d.path().is_none())
    }
}

impl<'a> IntoIterator for &'a OrderedDocumentSet {
    type Item = &'a SplitDocument;
    type IntoIter = std::slice::Iter<'a, SplitDocument>;

    fn into_iter(self) -> Self::IntoIter {
        self.docs.iter()
    }
}
