use anyhow::Result;
use ndarray::ArrayD;
use num_traits::cast::AsPrimitive;
use numpy::{Element, PyArrayDyn};
use pyo3::PyAny;

/// Converts a numpy array into an [`ArrayD`], casting the element type.
pub fn pyobj_to_arrayd<T1, T2>(obj: &PyAny) -> Result<ArrayD<T2>>
where
    T1: Element + AsPrimitive<T2>,
    T2: 'static + Copy,
{
    let arr: &PyArrayDyn<T1> = obj.extract()?;
    let arr = arr.to_owned_array();
    Ok(arr.mapv(|elem| elem.as_()))
}
