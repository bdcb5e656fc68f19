//! Image-backed item lifecycle within generic categories.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use lifedash_domain::{Category, Item, Metadata, Timestamped, MAX_RANK, MIN_RANK};

use crate::{
    objects::{generate_object_key, release_image, ImageCleanup, ImageUpload, ObjectStore},
    schema,
    storage::RecordStore,
    CoreError, CoreResult,
};

/// Input for a new item; the image is mandatory.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub image: ImageUpload,
    pub metadata: Metadata,
    pub rank: Option<u8>,
}

/// Partial edit; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub metadata: Option<Metadata>,
    /// `Some(None)` clears the rank.
    pub rank: Option<Option<u8>>,
}

pub struct ItemService;

impl ItemService {
    /// Items of one category, newest first.
    pub fn list_in<S: RecordStore>(store: &S, category_id: Uuid) -> CoreResult<Vec<Item>> {
        Ok(store
            .list::<Item>()?
            .into_iter()
            .filter(|item| item.category_id == category_id)
            .collect())
    }

    /// Uploads the image, then inserts the record.
    ///
    /// When the insert fails the uploaded object is removed again and the
    /// insert error is returned.
    pub fn create<S, O>(
        store: &S,
        objects: &O,
        category: &Category,
        new: NewItem,
        now: DateTime<Utc>,
    ) -> CoreResult<Item>
    where
        S: RecordStore,
        O: ObjectStore + ?Sized,
    {
        Self::require_item_category(category)?;
        let name = Self::validate_name(&new.name)?;
        if new.image.bytes.is_empty() {
            return Err(CoreError::invalid("an image is required"));
        }
        let rank = Self::effective_rank(category, new.rank)?;
        let mut metadata = new.metadata;
        metadata.retain_schema(schema::lookup(category.category_type));

        let key = generate_object_key(now, &new.image.file_name);
        let image_url = objects.put(&key, &new.image.bytes)?;

        let item = Item::new(category.id, name, image_url, now)
            .with_metadata(metadata)
            .with_rank(rank);
        match store.insert(item) {
            Ok(item) => {
                info!(id = %item.id, category = %category.id, "created item");
                Ok(item)
            }
            Err(err) => {
                warn!(error = %err, %key, "item insert failed after upload");
                if let Err(cleanup) = objects.delete(&key) {
                    warn!(%key, error = %cleanup, "uploaded image orphaned");
                }
                Err(err)
            }
        }
    }

    /// Applies name, metadata and rank edits. The image is left alone.
    pub fn update<S: RecordStore>(
        store: &S,
        category: &Category,
        id: Uuid,
        changes: ItemChanges,
        now: DateTime<Utc>,
    ) -> CoreResult<Item> {
        Self::require_item_category(category)?;
        let mut item: Item = store.get(id)?;
        if item.category_id != category.id {
            return Err(CoreError::invalid(format!(
                "item {id} does not belong to category `{}`",
                category.name
            )));
        }
        if let Some(name) = changes.name {
            item.name = Self::validate_name(&name)?;
        }
        if let Some(mut metadata) = changes.metadata {
            metadata.retain_schema(schema::lookup(category.category_type));
            item.metadata = metadata;
        }
        if let Some(rank) = changes.rank {
            item.rank = Self::effective_rank(category, rank)?;
        }
        item.touch(now);
        let item = store.update(item)?;
        info!(%id, "updated item");
        Ok(item)
    }

    /// Swaps the stored image; metadata is untouched.
    ///
    /// The new object is uploaded and the record updated before the old
    /// object is released. The returned cleanup reports that last step.
    pub fn replace_image<S, O>(
        store: &S,
        objects: &O,
        id: Uuid,
        image: ImageUpload,
        now: DateTime<Utc>,
    ) -> CoreResult<(Item, ImageCleanup)>
    where
        S: RecordStore,
        O: ObjectStore + ?Sized,
    {
        if image.bytes.is_empty() {
            return Err(CoreError::invalid("an image is required"));
        }
        let mut item: Item = store.get(id)?;
        let key = generate_object_key(now, &image.file_name);
        let new_url = objects.put(&key, &image.bytes)?;
        let old_url = std::mem::replace(&mut item.image_url, new_url);
        item.touch(now);

        let item = match store.update(item) {
            Ok(item) => item,
            Err(err) => {
                warn!(error = %err, %key, "image swap failed; removing new upload");
                if let Err(cleanup) = objects.delete(&key) {
                    warn!(%key, error = %cleanup, "uploaded image orphaned");
                }
                return Err(err);
            }
        };
        info!(%id, "replaced item image");
        let cleanup = release_image(objects, &old_url);
        Ok((item, cleanup))
    }

    /// Deletes the record, then releases its image.
    pub fn delete<S, O>(store: &S, objects: &O, id: Uuid) -> CoreResult<ImageCleanup>
    where
        S: RecordStore,
        O: ObjectStore + ?Sized,
    {
        let item: Item = store.get(id)?;
        store.delete::<Item>(id)?;
        info!(%id, "deleted item");
        Ok(release_image(objects, &item.image_url))
    }

    /// Checks a rank against `1..=100`.
    pub fn validate_rank(rank: u8) -> CoreResult<u8> {
        if (MIN_RANK..=MAX_RANK).contains(&rank) {
            Ok(rank)
        } else {
            Err(CoreError::invalid(format!(
                "rank must be between {MIN_RANK} and {MAX_RANK}"
            )))
        }
    }

    /// Fitness, finance and todo categories keep their own records, never items.
    fn require_item_category(category: &Category) -> CoreResult<()> {
        if category.category_type.has_dedicated_view() {
            return Err(CoreError::invalid(format!(
                "`{}` categories do not hold items",
                category.category_type.label()
            )));
        }
        Ok(())
    }

    /// Rank is kept only for rank-supporting category types and ignored elsewhere.
    fn effective_rank(category: &Category, rank: Option<u8>) -> CoreResult<Option<u8>> {
        if !category.category_type.supports_rank() {
            return Ok(None);
        }
        rank.map(Self::validate_rank).transpose()
    }

    fn validate_name(candidate: &str) -> CoreResult<String> {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            Err(CoreError::invalid("item name cannot be empty"))
        } else {
            Ok(trimmed.to_string())
        }
    }
}
