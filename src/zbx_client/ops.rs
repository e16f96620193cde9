use serde::Serialize;
use serde_json::Value;

use crate::Result;
use crate::error::ZbxError;
use crate::objects::ZbxObject;

use super::{Params, ZbxClient};

/// Method family shared by every [`ZbxObject`]; the typed wrappers in
/// `objects` delegate here.
impl ZbxClient {
    pub(crate) async fn get_objects<T: ZbxObject>(&self, params: Params) -> Result<Vec<T>> {
        let params = T::get_defaults(params);
        self.call(&format!("{}.get", T::API), &params).await
    }

    pub(crate) async fn get_object_by_id<T: ZbxObject>(&self, id: &str) -> Result<T> {
        let params = Params::new().set(T::IDS_FIELD, vec![id]);
        let mut found: Vec<T> = self.get_objects(params).await?;
        if found.len() != 1 {
            return Err(ZbxError::ExpectedOneResult { got: found.len() }.into());
        }
        Ok(found.remove(0))
    }

    pub(crate) async fn create_objects<T: ZbxObject>(&self, items: &mut [T]) -> Result<()> {
        let ids = self.mutate::<T, _>("create", &*items, items.len()).await?;
        for (item, id) in items.iter_mut().zip(ids) {
            item.set_id(id);
        }
        Ok(())
    }

    pub(crate) async fn update_objects<T: ZbxObject>(&self, items: &[T]) -> Result<()> {
        self.mutate::<T, _>("update", items, items.len()).await?;
        Ok(())
    }

    pub(crate) async fn delete_objects_by_ids<T: ZbxObject>(&self, ids: &[String]) -> Result<()> {
        self.mutate::<T, _>("delete", ids, ids.len()).await?;
        Ok(())
    }

    pub(crate) async fn delete_objects<T: ZbxObject>(&self, items: &mut [T]) -> Result<()> {
        let ids: Vec<String> = items.iter().map(|item| item.id().to_string()).collect();
        self.delete_objects_by_ids::<T>(&ids).await?;
        for item in items {
            item.set_id(String::new());
        }
        Ok(())
    }

    /// Run `<api>.<verb>` and return the affected ids, which must number
    /// `expected`.
    async fn mutate<T, P>(&self, verb: &str, params: &P, expected: usize) -> Result<Vec<String>>
    where
        T: ZbxObject,
        P: Serialize + ?Sized,
    {
        let result: Value = self.call(&format!("{}.{verb}", T::API), params).await?;
        let ids = ids_from_result(&result, T::IDS_FIELD)?;
        if ids.len() != expected {
            return Err(ZbxError::ExpectedMore {
                expected,
                got: ids.len(),
            }
            .into());
        }
        Ok(ids)
    }
}

fn ids_from_result(result: &Value, field: &'static str) -> Result<Vec<String>> {
    let ids = result
        .get(field)
        .and_then(Value::as_array)
        .ok_or(ZbxError::MissingField { field })?;

    ids.iter()
        .map(|id| match id {
            Value::String(id) => Ok(id.clone()),
            Value::Number(id) => Ok(id.to_string()),
            other => Err(ZbxError::InvalidField {
                field,
                message: format!("unexpected id {other}"),
            }
            .into()),
        })
        .collect()
}
