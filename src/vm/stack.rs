pub type Stack<T, const CAP: usize> = smallvec::SmallVec<[T; CAP]>;
